//! 课程存储操作

use super::SeaOrmStorage;
use crate::entity::prelude::*;
use crate::entity::{course_mates, course_mentors, courses, group_mates, groups, homeworks, tasks};
use crate::errors::{HwProjError, Result};
use crate::models::{
    accounts::entities::UserRole,
    courses::{
        entities::{Course, CourseDto, Group},
        requests::{CreateCourseRequest, UpdateCourseRequest},
    },
    homeworks::entities::Homework,
};
use crate::utils::random_code::generate_random_code;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建课程，创建者登记为首位导师
    pub async fn create_course_impl(
        &self,
        course: CreateCourseRequest,
        mentor_id: i64,
    ) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();
        let invite_code = generate_random_code(8); // 自动生成邀请码

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| HwProjError::database_operation(format!("开启事务失败: {e}")))?;

        let model = courses::ActiveModel {
            name: Set(course.name),
            group_name: Set(course.group_name),
            invite_code: Set(invite_code),
            is_open: Set(course.is_open.unwrap_or(false)),
            is_completed: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = model
            .insert(&txn)
            .await
            .map_err(|e| HwProjError::database_operation(format!("创建课程失败: {e}")))?;

        let mentor = course_mentors::ActiveModel {
            course_id: Set(created.id),
            mentor_id: Set(mentor_id),
            ..Default::default()
        };
        mentor
            .insert(&txn)
            .await
            .map_err(|e| HwProjError::database_operation(format!("登记课程导师失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| HwProjError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(created.into_course())
    }

    /// 获取课程聚合视图
    pub async fn get_course_impl(&self, course_id: i64) -> Result<Option<CourseDto>> {
        let Some(model) = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| HwProjError::database_operation(format!("查询课程失败: {e}")))?
        else {
            return Ok(None);
        };

        Ok(Some(self.assemble_course_dto(model).await?))
    }

    /// 通过任务 id 沿 任务→作业→课程 链获取课程
    pub async fn get_course_by_task_impl(&self, task_id: i64) -> Result<Option<CourseDto>> {
        let Some(task) = Tasks::find_by_id(task_id)
            .one(&self.db)
            .await
            .map_err(|e| HwProjError::database_operation(format!("查询任务失败: {e}")))?
        else {
            return Ok(None);
        };

        self.get_course_by_homework_impl(task.homework_id).await
    }

    /// 通过作业 id 获取课程
    pub async fn get_course_by_homework_impl(&self, homework_id: i64) -> Result<Option<CourseDto>> {
        let Some(homework) = Homeworks::find_by_id(homework_id)
            .one(&self.db)
            .await
            .map_err(|e| HwProjError::database_operation(format!("查询作业失败: {e}")))?
        else {
            return Ok(None);
        };

        self.get_course_impl(homework.course_id).await
    }

    /// 更新课程信息
    pub async fn update_course_impl(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        let Some(model) = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| HwProjError::database_operation(format!("查询课程失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut active: courses::ActiveModel = model.into();
        if let Some(name) = update.name {
            active.name = Set(name);
        }
        if let Some(group_name) = update.group_name {
            active.group_name = Set(group_name);
        }
        if let Some(is_open) = update.is_open {
            active.is_open = Set(is_open);
        }
        if let Some(is_completed) = update.is_completed {
            active.is_completed = Set(is_completed);
        }
        active.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| HwProjError::database_operation(format!("更新课程失败: {e}")))?;

        Ok(Some(updated.into_course()))
    }

    /// 删除课程（关联数据由外键级联删除）
    pub async fn delete_course_impl(&self, course_id: i64) -> Result<bool> {
        let result = Courses::delete_by_id(course_id)
            .exec(&self.db)
            .await
            .map_err(|e| HwProjError::database_operation(format!("删除课程失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 列出用户课程：学生取已接受入课的课程，讲师取执教课程
    pub async fn list_user_courses_impl(
        &self,
        user_id: i64,
        role: UserRole,
    ) -> Result<Vec<CourseDto>> {
        let course_ids: Vec<i64> = match role {
            UserRole::Student => CourseMates::find()
                .filter(course_mates::Column::StudentId.eq(user_id))
                .filter(course_mates::Column::IsAccepted.eq(true))
                .all(&self.db)
                .await
                .map_err(|e| HwProjError::database_operation(format!("查询入课记录失败: {e}")))?
                .into_iter()
                .map(|m| m.course_id)
                .collect(),
            UserRole::Lecturer => CourseMentors::find()
                .filter(course_mentors::Column::MentorId.eq(user_id))
                .all(&self.db)
                .await
                .map_err(|e| HwProjError::database_operation(format!("查询执教记录失败: {e}")))?
                .into_iter()
                .map(|m| m.course_id)
                .collect(),
        };

        if course_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = Courses::find()
            .filter(courses::Column::Id.is_in(course_ids))
            .order_by_desc(courses::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| HwProjError::database_operation(format!("查询课程列表失败: {e}")))?;

        let mut dtos = Vec::with_capacity(models.len());
        for model in models {
            dtos.push(self.assemble_course_dto(model).await?);
        }
        Ok(dtos)
    }

    /// 入课申请，(course, student) 已存在时返回 false
    pub async fn add_course_mate_impl(&self, course_id: i64, student_id: i64) -> Result<bool> {
        let existing = CourseMates::find()
            .filter(course_mates::Column::CourseId.eq(course_id))
            .filter(course_mates::Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| HwProjError::database_operation(format!("查询入课记录失败: {e}")))?;

        if existing.is_some() {
            return Ok(false);
        }

        let model = course_mates::ActiveModel {
            course_id: Set(course_id),
            student_id: Set(student_id),
            is_accepted: Set(false),
            joined_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        model
            .insert(&self.db)
            .await
            .map_err(|e| HwProjError::database_operation(format!("登记入课申请失败: {e}")))?;

        Ok(true)
    }

    /// 接受入课申请
    pub async fn accept_course_mate_impl(&self, course_id: i64, student_id: i64) -> Result<bool> {
        let Some(model) = CourseMates::find()
            .filter(course_mates::Column::CourseId.eq(course_id))
            .filter(course_mates::Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| HwProjError::database_operation(format!("查询入课记录失败: {e}")))?
        else {
            return Ok(false);
        };

        let mut active: course_mates::ActiveModel = model.into();
        active.is_accepted = Set(true);
        active
            .update(&self.db)
            .await
            .map_err(|e| HwProjError::database_operation(format!("接受入课申请失败: {e}")))?;

        Ok(true)
    }

    /// 拒绝入课申请（删除记录）
    pub async fn reject_course_mate_impl(&self, course_id: i64, student_id: i64) -> Result<bool> {
        let result = CourseMates::delete_many()
            .filter(course_mates::Column::CourseId.eq(course_id))
            .filter(course_mates::Column::StudentId.eq(student_id))
            .exec(&self.db)
            .await
            .map_err(|e| HwProjError::database_operation(format!("拒绝入课申请失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 添加课程导师，已存在时返回 false
    pub async fn add_course_mentor_impl(&self, course_id: i64, mentor_id: i64) -> Result<bool> {
        let existing = CourseMentors::find()
            .filter(course_mentors::Column::CourseId.eq(course_id))
            .filter(course_mentors::Column::MentorId.eq(mentor_id))
            .one(&self.db)
            .await
            .map_err(|e| HwProjError::database_operation(format!("查询课程导师失败: {e}")))?;

        if existing.is_some() {
            return Ok(false);
        }

        let model = course_mentors::ActiveModel {
            course_id: Set(course_id),
            mentor_id: Set(mentor_id),
            ..Default::default()
        };
        model
            .insert(&self.db)
            .await
            .map_err(|e| HwProjError::database_operation(format!("添加课程导师失败: {e}")))?;

        Ok(true)
    }

    /// 组装课程聚合视图：导师、成员、作业树、小组一次取全
    pub(crate) async fn assemble_course_dto(&self, model: courses::Model) -> Result<CourseDto> {
        let course_id = model.id;

        let mentor_ids: Vec<i64> = CourseMentors::find()
            .filter(course_mentors::Column::CourseId.eq(course_id))
            .order_by_asc(course_mentors::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| HwProjError::database_operation(format!("查询课程导师失败: {e}")))?
            .into_iter()
            .map(|m| m.mentor_id)
            .collect();

        let mates = CourseMates::find()
            .filter(course_mates::Column::CourseId.eq(course_id))
            .order_by_asc(course_mates::Column::JoinedAt)
            .all(&self.db)
            .await
            .map_err(|e| HwProjError::database_operation(format!("查询课程成员失败: {e}")))?
            .into_iter()
            .map(|m| m.into_course_mate())
            .collect();

        let homework_models = Homeworks::find()
            .filter(homeworks::Column::CourseId.eq(course_id))
            .order_by_asc(homeworks::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| HwProjError::database_operation(format!("查询作业失败: {e}")))?;

        let homework_ids: Vec<i64> = homework_models.iter().map(|m| m.id).collect();
        let task_models = if homework_ids.is_empty() {
            Vec::new()
        } else {
            Tasks::find()
                .filter(tasks::Column::HomeworkId.is_in(homework_ids))
                .order_by_asc(tasks::Column::Id)
                .all(&self.db)
                .await
                .map_err(|e| HwProjError::database_operation(format!("查询任务失败: {e}")))?
        };

        let mut homeworks_dto: Vec<Homework> = homework_models
            .into_iter()
            .map(|m| Homework {
                id: m.id,
                course_id: m.course_id,
                title: m.title,
                tasks: Vec::new(),
            })
            .collect();
        for task in task_models {
            if let Some(hw) = homeworks_dto.iter_mut().find(|h| h.id == task.homework_id) {
                hw.tasks.push(task.into_task());
            }
        }

        let group_models = Groups::find()
            .filter(groups::Column::CourseId.eq(course_id))
            .order_by_asc(groups::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| HwProjError::database_operation(format!("查询小组失败: {e}")))?;

        let group_ids: Vec<i64> = group_models.iter().map(|m| m.id).collect();
        let group_mate_models = if group_ids.is_empty() {
            Vec::new()
        } else {
            GroupMates::find()
                .filter(group_mates::Column::GroupId.is_in(group_ids))
                .order_by_asc(group_mates::Column::Id)
                .all(&self.db)
                .await
                .map_err(|e| HwProjError::database_operation(format!("查询小组成员失败: {e}")))?
        };

        let groups_dto = group_models
            .into_iter()
            .map(|g| Group {
                id: g.id,
                course_id: g.course_id,
                student_ids: group_mate_models
                    .iter()
                    .filter(|gm| gm.group_id == g.id)
                    .map(|gm| gm.student_id)
                    .collect(),
            })
            .collect();

        Ok(CourseDto {
            id: model.id,
            name: model.name,
            group_name: model.group_name,
            invite_code: model.invite_code,
            is_open: model.is_open,
            is_completed: model.is_completed,
            mentor_ids,
            course_mates: mates,
            homeworks: homeworks_dto,
            groups: groups_dto,
        })
    }
}
