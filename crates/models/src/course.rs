use sea_orm::{entity::prelude::*, DatabaseConnection, NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::{errors, field, subject};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "course")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub field_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Field,
    Subject,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Field => Entity::belongs_to(field::Entity)
                .from(Column::FieldId)
                .to(field::Column::Id)
                .into(),
            Relation::Subject => Entity::has_many(subject::Entity).into(),
        }
    }
}

impl Related<field::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Field.def()
    }
}

impl Related<subject::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create(db: &DatabaseConnection, name: &str, field_id: Option<i32>) -> Result<Model, errors::ModelError> {
    errors::validate_name("course", name)?;
    let am = ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        field_id: Set(field_id),
    };
    Ok(am.insert(db).await?)
}

/// `name` is kept when `None`; `field_id` is always overwritten.
pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    name: Option<&str>,
    field_id: Option<i32>,
) -> Result<Model, errors::ModelError> {
    let mut am: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(errors::ModelError::NotFound("course"))?
        .into();
    if let Some(name) = name {
        errors::validate_name("course", name)?;
        am.name = Set(name.to_string());
    }
    am.field_id = Set(field_id);
    Ok(am.update(db).await?)
}

pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
