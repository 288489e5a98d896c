use sea_orm::{entity::prelude::*, DatabaseConnection, NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::{course, errors};

/// Field of study (e.g. "Engineering").
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "field")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Course,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Course => Entity::has_many(course::Entity).into(),
        }
    }
}

impl Related<course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create(db: &DatabaseConnection, name: &str) -> Result<Model, errors::ModelError> {
    errors::validate_name("field", name)?;
    let am = ActiveModel { id: NotSet, name: Set(name.to_string()) };
    Ok(am.insert(db).await?)
}

pub async fn rename(db: &DatabaseConnection, id: i32, name: &str) -> Result<Model, errors::ModelError> {
    errors::validate_name("field", name)?;
    let mut am: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(errors::ModelError::NotFound("field"))?
        .into();
    am.name = Set(name.to_string());
    Ok(am.update(db).await?)
}

/// Returns whether a row was removed. Courses that reference the field keep
/// their `field_id`.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
