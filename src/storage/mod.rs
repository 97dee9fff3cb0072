use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

/// 创建用户的存储层数据（密码已在服务层哈希）
#[derive(Debug, Clone)]
pub struct CreateUserData {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub surname: String,
    pub middle_name: Option<String>,
    pub role: UserRole,
    pub is_external_auth: bool,
}

/// 新解答的存储层数据
#[derive(Debug, Clone)]
pub struct NewSolution {
    pub student_id: i64,
    pub group_id: Option<i64>,
    pub comment: Option<String>,
    pub github_url: Option<String>,
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 账户方法（对应原系统的 AuthService 客户端）
    // 创建用户
    async fn create_user(&self, user: CreateUserData) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户及密码哈希（登录校验用）
    async fn get_user_credentials(&self, email: &str) -> Result<Option<(User, String)>>;
    // 批量解析账户资料，未知 id 跳过
    async fn get_accounts_data(&self, user_ids: &[i64]) -> Result<Vec<AccountData>>;
    // 列出全部讲师
    async fn get_all_lecturers(&self) -> Result<Vec<AccountData>>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;

    /// 课程方法（对应原系统的 CoursesService 客户端）
    // 创建课程，创建者成为首位导师
    async fn create_course(&self, course: CreateCourseRequest, mentor_id: i64) -> Result<Course>;
    // 获取课程聚合视图
    async fn get_course(&self, course_id: i64) -> Result<Option<CourseDto>>;
    // 通过任务 id 沿 任务→作业→课程 链获取课程
    async fn get_course_by_task(&self, task_id: i64) -> Result<Option<CourseDto>>;
    // 通过作业 id 获取课程
    async fn get_course_by_homework(&self, homework_id: i64) -> Result<Option<CourseDto>>;
    // 更新课程信息
    async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>>;
    // 删除课程
    async fn delete_course(&self, course_id: i64) -> Result<bool>;
    // 列出用户课程：学生取已接受入课的课程，讲师取执教课程
    async fn list_user_courses(&self, user_id: i64, role: UserRole) -> Result<Vec<CourseDto>>;
    // 入课申请，(course, student) 已存在时返回 false
    async fn add_course_mate(&self, course_id: i64, student_id: i64) -> Result<bool>;
    // 接受入课申请
    async fn accept_course_mate(&self, course_id: i64, student_id: i64) -> Result<bool>;
    // 拒绝入课申请（删除记录）
    async fn reject_course_mate(&self, course_id: i64, student_id: i64) -> Result<bool>;
    // 添加课程导师，已存在时返回 false
    async fn add_course_mentor(&self, course_id: i64, mentor_id: i64) -> Result<bool>;
    // 创建解题小组并登记成员，返回小组 id
    async fn create_course_group(&self, course_id: i64, student_ids: &[i64]) -> Result<i64>;
    // 创建作业
    async fn create_homework(
        &self,
        course_id: i64,
        homework: CreateHomeworkRequest,
    ) -> Result<Homework>;
    // 创建任务
    async fn create_task(&self, homework_id: i64, task: CreateTaskRequest)
    -> Result<HomeworkTask>;

    /// 解答方法（对应原系统的 SolutionsService 客户端）
    // 提交解答
    async fn post_solution(&self, task_id: i64, solution: NewSolution) -> Result<Solution>;
    // 提交带评分的空解答（平台外交付 / 放弃任务）
    async fn post_empty_solution_with_rate(
        &self,
        task_id: i64,
        student_id: i64,
        lecturer_id: Option<i64>,
        rating: i32,
        comment: String,
        lecturer_comment: Option<String>,
    ) -> Result<Solution>;
    // 通过ID获取解答
    async fn get_solution_by_id(&self, solution_id: i64) -> Result<Option<Solution>>;
    // 评分，解答置为 rated 状态
    async fn rate_solution(
        &self,
        solution_id: i64,
        lecturer_id: i64,
        rating: i32,
        lecturer_comment: Option<String>,
    ) -> Result<bool>;
    // 解答定稿
    async fn mark_solution_final(&self, solution_id: i64) -> Result<bool>;
    // 删除解答
    async fn delete_solution(&self, solution_id: i64) -> Result<bool>;
    // 单个学生在课程内的解答统计树
    async fn get_course_statistics(
        &self,
        course_id: i64,
        student_id: i64,
    ) -> Result<Option<CourseStatistics>>;
    // 某任务按学生分组的全部解答
    async fn get_task_solution_statistics(
        &self,
        task_id: i64,
    ) -> Result<Vec<StudentTaskSolutions>>;
    // 任务级聚合统计，结果顺序与入参一致
    async fn get_task_solutions_stats(&self, task_ids: &[i64]) -> Result<Vec<TaskSolutionsStats>>;
    // 任务集合下的全部未评分解答（附首次提交标记）
    async fn get_unrated_solutions_for_tasks(
        &self,
        task_ids: &[i64],
    ) -> Result<Vec<UnratedSolution>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
