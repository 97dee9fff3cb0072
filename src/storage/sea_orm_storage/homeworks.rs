//! 作业与任务存储操作

use super::SeaOrmStorage;
use crate::entity::{homeworks, tasks};
use crate::errors::{HwProjError, Result};
use crate::models::homeworks::{
    entities::{Homework, HomeworkTask},
    requests::{CreateHomeworkRequest, CreateTaskRequest},
};
use sea_orm::{ActiveModelTrait, Set};

impl SeaOrmStorage {
    /// 创建作业
    pub async fn create_homework_impl(
        &self,
        course_id: i64,
        homework: CreateHomeworkRequest,
    ) -> Result<Homework> {
        let model = homeworks::ActiveModel {
            course_id: Set(course_id),
            title: Set(homework.title),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let created = model
            .insert(&self.db)
            .await
            .map_err(|e| HwProjError::database_operation(format!("创建作业失败: {e}")))?;

        Ok(Homework {
            id: created.id,
            course_id: created.course_id,
            title: created.title,
            tasks: Vec::new(),
        })
    }

    /// 创建任务，发布时间缺省为当前时刻
    pub async fn create_task_impl(
        &self,
        homework_id: i64,
        task: CreateTaskRequest,
    ) -> Result<HomeworkTask> {
        let publication_date = task
            .publication_date
            .unwrap_or_else(chrono::Utc::now)
            .timestamp();

        let model = tasks::ActiveModel {
            homework_id: Set(homework_id),
            title: Set(task.title),
            max_rating: Set(task.max_rating),
            publication_date: Set(publication_date),
            deadline_date: Set(task.deadline_date.map(|d| d.timestamp())),
            ..Default::default()
        };

        let created = model
            .insert(&self.db)
            .await
            .map_err(|e| HwProjError::database_operation(format!("创建任务失败: {e}")))?;

        Ok(created.into_task())
    }
}
