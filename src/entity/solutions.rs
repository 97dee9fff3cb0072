//! 解答实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "solutions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub task_id: i64,
    pub student_id: i64,
    pub group_id: Option<i64>,
    pub lecturer_id: Option<i64>,
    pub rating: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub lecturer_comment: Option<String>,
    pub state: String,
    pub github_url: Option<String>,
    pub publication_date: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tasks::Entity",
        from = "Column::TaskId",
        to = "super::tasks::Column::Id"
    )]
    Task,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::StudentId",
        to = "super::users::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::groups::Entity",
        from = "Column::GroupId",
        to = "super::groups::Column::Id"
    )]
    Group,
}

impl Related<super::tasks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Task.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Group.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_solution(self) -> crate::models::solutions::entities::Solution {
        use crate::models::solutions::entities::{Solution, SolutionState};
        use chrono::{DateTime, Utc};
        use std::str::FromStr;

        Solution {
            id: self.id,
            task_id: self.task_id,
            student_id: self.student_id,
            group_id: self.group_id,
            lecturer_id: self.lecturer_id,
            rating: self.rating,
            comment: self.comment,
            lecturer_comment: self.lecturer_comment,
            state: SolutionState::from_str(&self.state).unwrap_or(SolutionState::Posted),
            github_url: self.github_url,
            publication_date: DateTime::<Utc>::from_timestamp(self.publication_date, 0)
                .unwrap_or_default(),
        }
    }
}
