//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod courses;
mod groups;
mod homeworks;
mod solutions;
mod users;

use crate::config::AppConfig;
use crate::errors::{HwProjError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| HwProjError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| HwProjError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| HwProjError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| HwProjError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(HwProjError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    accounts::entities::{AccountData, User, UserRole},
    courses::{
        entities::{Course, CourseDto},
        requests::{CreateCourseRequest, UpdateCourseRequest},
    },
    homeworks::{
        entities::{Homework, HomeworkTask},
        requests::{CreateHomeworkRequest, CreateTaskRequest},
    },
    solutions::{
        entities::Solution,
        statistics::{CourseStatistics, StudentTaskSolutions, TaskSolutionsStats, UnratedSolution},
    },
};
use crate::storage::{CreateUserData, NewSolution, Storage};
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 账户模块
    async fn create_user(&self, user: CreateUserData) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_credentials(&self, email: &str) -> Result<Option<(User, String)>> {
        self.get_user_credentials_impl(email).await
    }

    async fn get_accounts_data(&self, user_ids: &[i64]) -> Result<Vec<AccountData>> {
        self.get_accounts_data_impl(user_ids).await
    }

    async fn get_all_lecturers(&self) -> Result<Vec<AccountData>> {
        self.get_all_lecturers_impl().await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    // 课程模块
    async fn create_course(&self, course: CreateCourseRequest, mentor_id: i64) -> Result<Course> {
        self.create_course_impl(course, mentor_id).await
    }

    async fn get_course(&self, course_id: i64) -> Result<Option<CourseDto>> {
        self.get_course_impl(course_id).await
    }

    async fn get_course_by_task(&self, task_id: i64) -> Result<Option<CourseDto>> {
        self.get_course_by_task_impl(task_id).await
    }

    async fn get_course_by_homework(&self, homework_id: i64) -> Result<Option<CourseDto>> {
        self.get_course_by_homework_impl(homework_id).await
    }

    async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        self.update_course_impl(course_id, update).await
    }

    async fn delete_course(&self, course_id: i64) -> Result<bool> {
        self.delete_course_impl(course_id).await
    }

    async fn list_user_courses(&self, user_id: i64, role: UserRole) -> Result<Vec<CourseDto>> {
        self.list_user_courses_impl(user_id, role).await
    }

    async fn add_course_mate(&self, course_id: i64, student_id: i64) -> Result<bool> {
        self.add_course_mate_impl(course_id, student_id).await
    }

    async fn accept_course_mate(&self, course_id: i64, student_id: i64) -> Result<bool> {
        self.accept_course_mate_impl(course_id, student_id).await
    }

    async fn reject_course_mate(&self, course_id: i64, student_id: i64) -> Result<bool> {
        self.reject_course_mate_impl(course_id, student_id).await
    }

    async fn add_course_mentor(&self, course_id: i64, mentor_id: i64) -> Result<bool> {
        self.add_course_mentor_impl(course_id, mentor_id).await
    }

    async fn create_course_group(&self, course_id: i64, student_ids: &[i64]) -> Result<i64> {
        self.create_course_group_impl(course_id, student_ids).await
    }

    async fn create_homework(
        &self,
        course_id: i64,
        homework: CreateHomeworkRequest,
    ) -> Result<Homework> {
        self.create_homework_impl(course_id, homework).await
    }

    async fn create_task(
        &self,
        homework_id: i64,
        task: CreateTaskRequest,
    ) -> Result<HomeworkTask> {
        self.create_task_impl(homework_id, task).await
    }

    // 解答模块
    async fn post_solution(&self, task_id: i64, solution: NewSolution) -> Result<Solution> {
        self.post_solution_impl(task_id, solution).await
    }

    async fn post_empty_solution_with_rate(
        &self,
        task_id: i64,
        student_id: i64,
        lecturer_id: Option<i64>,
        rating: i32,
        comment: String,
        lecturer_comment: Option<String>,
    ) -> Result<Solution> {
        self.post_empty_solution_with_rate_impl(
            task_id,
            student_id,
            lecturer_id,
            rating,
            comment,
            lecturer_comment,
        )
        .await
    }

    async fn get_solution_by_id(&self, solution_id: i64) -> Result<Option<Solution>> {
        self.get_solution_by_id_impl(solution_id).await
    }

    async fn rate_solution(
        &self,
        solution_id: i64,
        lecturer_id: i64,
        rating: i32,
        lecturer_comment: Option<String>,
    ) -> Result<bool> {
        self.rate_solution_impl(solution_id, lecturer_id, rating, lecturer_comment)
            .await
    }

    async fn mark_solution_final(&self, solution_id: i64) -> Result<bool> {
        self.mark_solution_final_impl(solution_id).await
    }

    async fn delete_solution(&self, solution_id: i64) -> Result<bool> {
        self.delete_solution_impl(solution_id).await
    }

    async fn get_course_statistics(
        &self,
        course_id: i64,
        student_id: i64,
    ) -> Result<Option<CourseStatistics>> {
        self.get_course_statistics_impl(course_id, student_id).await
    }

    async fn get_task_solution_statistics(
        &self,
        task_id: i64,
    ) -> Result<Vec<StudentTaskSolutions>> {
        self.get_task_solution_statistics_impl(task_id).await
    }

    async fn get_task_solutions_stats(&self, task_ids: &[i64]) -> Result<Vec<TaskSolutionsStats>> {
        self.get_task_solutions_stats_impl(task_ids).await
    }

    async fn get_unrated_solutions_for_tasks(
        &self,
        task_ids: &[i64],
    ) -> Result<Vec<UnratedSolution>> {
        self.get_unrated_solutions_for_tasks_impl(task_ids).await
    }
}
