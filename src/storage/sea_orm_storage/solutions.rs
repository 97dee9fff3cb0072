//! 解答存储操作

use std::collections::{HashMap, HashSet};

use super::SeaOrmStorage;
use crate::entity::prelude::*;
use crate::entity::{homeworks, solutions, tasks};
use crate::errors::{HwProjError, Result};
use crate::models::solutions::{
    entities::{Solution, SolutionState},
    statistics::{
        CourseStatistics, HomeworkStatistics, StudentTaskSolutions, TaskSolutionsStats,
        TaskStatistics, UnratedSolution,
    },
};
use crate::storage::NewSolution;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

/// 每个 (任务, 学生) 组合里最早提交的解答 id 集合。
/// 首次提交的判定要覆盖全部解答，含已评分的。
fn first_try_ids(models: &[solutions::Model]) -> HashSet<i64> {
    let mut first: HashMap<(i64, i64), (i64, i64)> = HashMap::new();
    for m in models {
        let entry = first
            .entry((m.task_id, m.student_id))
            .or_insert((m.publication_date, m.id));
        if (m.publication_date, m.id) < *entry {
            *entry = (m.publication_date, m.id);
        }
    }
    first.into_values().map(|(_, id)| id).collect()
}

impl SeaOrmStorage {
    /// 提交解答
    pub async fn post_solution_impl(
        &self,
        task_id: i64,
        solution: NewSolution,
    ) -> Result<Solution> {
        let model = solutions::ActiveModel {
            task_id: Set(task_id),
            student_id: Set(solution.student_id),
            group_id: Set(solution.group_id),
            lecturer_id: Set(None),
            rating: Set(0),
            comment: Set(solution.comment),
            lecturer_comment: Set(None),
            state: Set(SolutionState::Posted.to_string()),
            github_url: Set(solution.github_url),
            publication_date: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let created = model
            .insert(&self.db)
            .await
            .map_err(|e| HwProjError::database_operation(format!("提交解答失败: {e}")))?;

        Ok(created.into_solution())
    }

    /// 提交带评分的空解答（平台外交付 / 放弃任务）
    pub async fn post_empty_solution_with_rate_impl(
        &self,
        task_id: i64,
        student_id: i64,
        lecturer_id: Option<i64>,
        rating: i32,
        comment: String,
        lecturer_comment: Option<String>,
    ) -> Result<Solution> {
        let model = solutions::ActiveModel {
            task_id: Set(task_id),
            student_id: Set(student_id),
            group_id: Set(None),
            lecturer_id: Set(lecturer_id),
            rating: Set(rating),
            comment: Set(Some(comment)),
            lecturer_comment: Set(lecturer_comment),
            state: Set(SolutionState::Rated.to_string()),
            github_url: Set(None),
            publication_date: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let created = model
            .insert(&self.db)
            .await
            .map_err(|e| HwProjError::database_operation(format!("提交空解答失败: {e}")))?;

        Ok(created.into_solution())
    }

    /// 通过 ID 获取解答
    pub async fn get_solution_by_id_impl(&self, solution_id: i64) -> Result<Option<Solution>> {
        let result = Solutions::find_by_id(solution_id)
            .one(&self.db)
            .await
            .map_err(|e| HwProjError::database_operation(format!("查询解答失败: {e}")))?;

        Ok(result.map(|m| m.into_solution()))
    }

    /// 评分，解答置为 rated 状态
    pub async fn rate_solution_impl(
        &self,
        solution_id: i64,
        lecturer_id: i64,
        rating: i32,
        lecturer_comment: Option<String>,
    ) -> Result<bool> {
        let Some(model) = Solutions::find_by_id(solution_id)
            .one(&self.db)
            .await
            .map_err(|e| HwProjError::database_operation(format!("查询解答失败: {e}")))?
        else {
            return Ok(false);
        };

        let mut active: solutions::ActiveModel = model.into();
        active.rating = Set(rating);
        active.lecturer_id = Set(Some(lecturer_id));
        if lecturer_comment.is_some() {
            active.lecturer_comment = Set(lecturer_comment);
        }
        active.state = Set(SolutionState::Rated.to_string());

        active
            .update(&self.db)
            .await
            .map_err(|e| HwProjError::database_operation(format!("评分失败: {e}")))?;

        Ok(true)
    }

    /// 解答定稿
    pub async fn mark_solution_final_impl(&self, solution_id: i64) -> Result<bool> {
        let Some(model) = Solutions::find_by_id(solution_id)
            .one(&self.db)
            .await
            .map_err(|e| HwProjError::database_operation(format!("查询解答失败: {e}")))?
        else {
            return Ok(false);
        };

        let mut active: solutions::ActiveModel = model.into();
        active.state = Set(SolutionState::Final.to_string());
        active
            .update(&self.db)
            .await
            .map_err(|e| HwProjError::database_operation(format!("解答定稿失败: {e}")))?;

        Ok(true)
    }

    /// 删除解答
    pub async fn delete_solution_impl(&self, solution_id: i64) -> Result<bool> {
        let result = Solutions::delete_by_id(solution_id)
            .exec(&self.db)
            .await
            .map_err(|e| HwProjError::database_operation(format!("删除解答失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 单个学生在课程内的解答统计树：作业 → 任务 → 解答。
    /// 课程不存在时返回 None；没有解答的任务保留空列表。
    pub async fn get_course_statistics_impl(
        &self,
        course_id: i64,
        student_id: i64,
    ) -> Result<Option<CourseStatistics>> {
        let course = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| HwProjError::database_operation(format!("查询课程失败: {e}")))?;
        if course.is_none() {
            return Ok(None);
        }

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

        let task_ids: Vec<i64> = task_models.iter().map(|m| m.id).collect();
        let solution_models = if task_ids.is_empty() {
            Vec::new()
        } else {
            Solutions::find()
                .filter(solutions::Column::TaskId.is_in(task_ids))
                .filter(solutions::Column::StudentId.eq(student_id))
                .order_by_asc(solutions::Column::PublicationDate)
                .order_by_asc(solutions::Column::Id)
                .all(&self.db)
                .await
                .map_err(|e| HwProjError::database_operation(format!("查询解答失败: {e}")))?
        };

        let mut by_task: HashMap<i64, Vec<Solution>> = HashMap::new();
        for m in solution_models {
            by_task.entry(m.task_id).or_default().push(m.into_solution());
        }

        let homeworks_stats = homework_models
            .iter()
            .map(|hw| HomeworkStatistics {
                homework_id: hw.id,
                tasks: task_models
                    .iter()
                    .filter(|t| t.homework_id == hw.id)
                    .map(|t| TaskStatistics {
                        task_id: t.id,
                        solutions: by_task.remove(&t.id).unwrap_or_default(),
                    })
                    .collect(),
            })
            .collect();

        Ok(Some(CourseStatistics {
            student_id,
            homeworks: homeworks_stats,
        }))
    }

    /// 某任务按学生分组的全部解答，组内按提交时间升序
    pub async fn get_task_solution_statistics_impl(
        &self,
        task_id: i64,
    ) -> Result<Vec<StudentTaskSolutions>> {
        let models = Solutions::find()
            .filter(solutions::Column::TaskId.eq(task_id))
            .order_by_asc(solutions::Column::PublicationDate)
            .order_by_asc(solutions::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| HwProjError::database_operation(format!("查询解答失败: {e}")))?;

        let mut order: Vec<i64> = Vec::new();
        let mut by_student: HashMap<i64, Vec<Solution>> = HashMap::new();
        for m in models {
            if !by_student.contains_key(&m.student_id) {
                order.push(m.student_id);
            }
            by_student
                .entry(m.student_id)
                .or_default()
                .push(m.into_solution());
        }

        Ok(order
            .into_iter()
            .map(|student_id| StudentTaskSolutions {
                student_id,
                solutions: by_student.remove(&student_id).unwrap_or_default(),
            })
            .collect())
    }

    /// 任务级聚合统计，结果顺序与入参一致，标题由任务表回填
    pub async fn get_task_solutions_stats_impl(
        &self,
        task_ids: &[i64],
    ) -> Result<Vec<TaskSolutionsStats>> {
        if task_ids.is_empty() {
            return Ok(Vec::new());
        }

        let task_models = Tasks::find()
            .filter(tasks::Column::Id.is_in(task_ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(|e| HwProjError::database_operation(format!("查询任务失败: {e}")))?;
        let titles: HashMap<i64, String> =
            task_models.into_iter().map(|t| (t.id, t.title)).collect();

        let solution_models = Solutions::find()
            .filter(solutions::Column::TaskId.is_in(task_ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(|e| HwProjError::database_operation(format!("查询解答失败: {e}")))?;

        let mut counts: HashMap<i64, (i64, i64)> = HashMap::new();
        for m in &solution_models {
            let entry = counts.entry(m.task_id).or_insert((0, 0));
            entry.0 += 1;
            if m.state != SolutionState::POSTED {
                entry.1 += 1;
            }
        }

        Ok(task_ids
            .iter()
            .filter(|id| titles.contains_key(*id))
            .map(|id| {
                let (solutions_count, rated_count) = counts.get(id).copied().unwrap_or((0, 0));
                TaskSolutionsStats {
                    task_id: *id,
                    title: titles.get(id).cloned().unwrap_or_default(),
                    solutions_count,
                    rated_count,
                }
            })
            .collect())
    }

    /// 任务集合下的全部未评分解答，附首次提交标记
    pub async fn get_unrated_solutions_for_tasks_impl(
        &self,
        task_ids: &[i64],
    ) -> Result<Vec<UnratedSolution>> {
        if task_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = Solutions::find()
            .filter(solutions::Column::TaskId.is_in(task_ids.to_vec()))
            .order_by_asc(solutions::Column::PublicationDate)
            .order_by_asc(solutions::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| HwProjError::database_operation(format!("查询解答失败: {e}")))?;

        let first = first_try_ids(&models);

        Ok(models
            .into_iter()
            .filter(|m| m.state == SolutionState::POSTED)
            .map(|m| UnratedSolution {
                is_first_try: first.contains(&m.id),
                solution: m.into_solution(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(id: i64, task_id: i64, student_id: i64, publication_date: i64) -> solutions::Model {
        solutions::Model {
            id,
            task_id,
            student_id,
            group_id: None,
            lecturer_id: None,
            rating: 0,
            comment: None,
            lecturer_comment: None,
            state: SolutionState::POSTED.to_string(),
            github_url: None,
            publication_date,
        }
    }

    #[test]
    fn test_first_try_picks_earliest_per_task_student_pair() {
        let models = vec![
            model(1, 10, 100, 1000),
            model(2, 10, 100, 2000),
            model(3, 10, 200, 1500),
            model(4, 20, 100, 500),
        ];
        let first = first_try_ids(&models);
        assert!(first.contains(&1));
        assert!(!first.contains(&2));
        assert!(first.contains(&3));
        assert!(first.contains(&4));
    }

    #[test]
    fn test_first_try_breaks_timestamp_ties_by_id() {
        let models = vec![model(7, 10, 100, 1000), model(5, 10, 100, 1000)];
        let first = first_try_ids(&models);
        assert!(first.contains(&5));
        assert!(!first.contains(&7));
    }
}
