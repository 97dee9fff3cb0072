use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::homeworks::entities::{Homework, HomeworkTask};

// 课程基础实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub group_name: String,
    pub invite_code: String,
    pub is_open: bool,
    pub is_completed: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 课程成员（入课申请记录，接受后 is_accepted = true）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseMate {
    pub course_id: i64,
    pub student_id: i64,
    pub is_accepted: bool,
}

// 解题小组：成员集合是小组复用的判定键
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Group {
    pub id: i64,
    pub course_id: i64,
    pub student_ids: Vec<i64>,
}

// 聚合后的课程视图：作业/任务/成员/小组/导师一次取全
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseDto {
    pub id: i64,
    pub name: String,
    pub group_name: String,
    pub invite_code: String,
    pub is_open: bool,
    pub is_completed: bool,
    pub mentor_ids: Vec<i64>,
    pub course_mates: Vec<CourseMate>,
    pub homeworks: Vec<Homework>,
    pub groups: Vec<Group>,
}

impl CourseDto {
    /// 已接受的学生 id 列表
    pub fn accepted_student_ids(&self) -> Vec<i64> {
        self.course_mates
            .iter()
            .filter(|cm| cm.is_accepted)
            .map(|cm| cm.student_id)
            .collect()
    }

    /// 学生是否为已接受成员
    pub fn is_accepted_student(&self, student_id: i64) -> bool {
        self.course_mates
            .iter()
            .any(|cm| cm.is_accepted && cm.student_id == student_id)
    }

    /// 学生是否为课程成员（含待审核）
    pub fn is_course_mate(&self, student_id: i64) -> bool {
        self.course_mates
            .iter()
            .any(|cm| cm.student_id == student_id)
    }

    /// 用户是否为课程导师
    pub fn is_mentor(&self, user_id: i64) -> bool {
        self.mentor_ids.contains(&user_id)
    }

    /// 全部任务的迭代器（作业 → 任务展开）
    pub fn all_tasks(&self) -> impl Iterator<Item = &HomeworkTask> {
        self.homeworks.iter().flat_map(|hw| hw.tasks.iter())
    }
}
