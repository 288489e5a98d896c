use sea_orm::{entity::prelude::*, DatabaseConnection, NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::{course, errors, student};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subject")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub course_id: Option<i32>,
    pub student_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Course,
    Student,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Course => Entity::belongs_to(course::Entity)
                .from(Column::CourseId)
                .to(course::Column::Id)
                .into(),
            Relation::Student => Entity::belongs_to(student::Entity)
                .from(Column::StudentId)
                .to(student::Column::Id)
                .into(),
        }
    }
}

impl Related<course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create(
    db: &DatabaseConnection,
    name: &str,
    course_id: Option<i32>,
    student_id: Option<i32>,
) -> Result<Model, errors::ModelError> {
    errors::validate_name("subject", name)?;
    let am = ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        course_id: Set(course_id),
        student_id: Set(student_id),
    };
    Ok(am.insert(db).await?)
}

/// `name` is kept when `None`; both references are always overwritten.
pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    name: Option<&str>,
    course_id: Option<i32>,
    student_id: Option<i32>,
) -> Result<Model, errors::ModelError> {
    let mut am: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(errors::ModelError::NotFound("subject"))?
        .into();
    if let Some(name) = name {
        errors::validate_name("subject", name)?;
        am.name = Set(name.to_string());
    }
    am.course_id = Set(course_id);
    am.student_id = Set(student_id);
    Ok(am.update(db).await?)
}

pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
