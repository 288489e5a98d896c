use sea_orm::{entity::prelude::*, DatabaseConnection, NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::{errors, subject};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "student")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub registration_code: String,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Subject,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Subject => Entity::has_many(subject::Entity).into(),
        }
    }
}

impl Related<subject::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create(db: &DatabaseConnection, registration_code: &str, name: &str) -> Result<Model, errors::ModelError> {
    errors::validate_name("student", name)?;
    let am = ActiveModel {
        id: NotSet,
        registration_code: Set(registration_code.to_string()),
        name: Set(name.to_string()),
    };
    Ok(am.insert(db).await?)
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    name: Option<&str>,
    registration_code: Option<&str>,
) -> Result<Model, errors::ModelError> {
    let current = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(errors::ModelError::NotFound("student"))?;
    if name.is_none() && registration_code.is_none() {
        return Ok(current);
    }
    let mut am: ActiveModel = current.into();
    if let Some(name) = name {
        errors::validate_name("student", name)?;
        am.name = Set(name.to_string());
    }
    if let Some(code) = registration_code {
        am.registration_code = Set(code.to_string());
    }
    Ok(am.update(db).await?)
}

pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
