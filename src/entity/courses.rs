//! 课程实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub group_name: String,
    #[sea_orm(unique)]
    pub invite_code: String,
    pub is_open: bool,
    pub is_completed: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::course_mentors::Entity")]
    CourseMentors,
    #[sea_orm(has_many = "super::course_mates::Entity")]
    CourseMates,
    #[sea_orm(has_many = "super::homeworks::Entity")]
    Homeworks,
    #[sea_orm(has_many = "super::groups::Entity")]
    Groups,
}

impl Related<super::course_mentors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseMentors.def()
    }
}

impl Related<super::course_mates::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseMates.def()
    }
}

impl Related<super::homeworks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Homeworks.def()
    }
}

impl Related<super::groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Groups.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_course(self) -> crate::models::courses::entities::Course {
        use crate::models::courses::entities::Course;
        use chrono::{DateTime, Utc};

        Course {
            id: self.id,
            name: self.name,
            group_name: self.group_name,
            invite_code: self.invite_code,
            is_open: self.is_open,
            is_completed: self.is_completed,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
