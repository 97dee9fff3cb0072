//! 任务实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub homework_id: i64,
    pub title: String,
    pub max_rating: i32,
    pub publication_date: i64,
    pub deadline_date: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::homeworks::Entity",
        from = "Column::HomeworkId",
        to = "super::homeworks::Column::Id"
    )]
    Homework,
    #[sea_orm(has_many = "super::solutions::Entity")]
    Solutions,
}

impl Related<super::homeworks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Homework.def()
    }
}

impl Related<super::solutions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Solutions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_task(self) -> crate::models::homeworks::entities::HomeworkTask {
        use crate::models::homeworks::entities::HomeworkTask;
        use chrono::{DateTime, Utc};

        HomeworkTask {
            id: self.id,
            homework_id: self.homework_id,
            title: self.title,
            max_rating: self.max_rating,
            publication_date: DateTime::<Utc>::from_timestamp(self.publication_date, 0)
                .unwrap_or_default(),
            deadline_date: self
                .deadline_date
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
        }
    }
}
