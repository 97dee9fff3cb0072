//! 预导入模块，方便使用

pub use super::course_mates::{
    ActiveModel as CourseMateActiveModel, Entity as CourseMates, Model as CourseMateModel,
};
pub use super::course_mentors::{
    ActiveModel as CourseMentorActiveModel, Entity as CourseMentors, Model as CourseMentorModel,
};
pub use super::courses::{
    ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel,
};
pub use super::group_mates::{
    ActiveModel as GroupMateActiveModel, Entity as GroupMates, Model as GroupMateModel,
};
pub use super::groups::{ActiveModel as GroupActiveModel, Entity as Groups, Model as GroupModel};
pub use super::homeworks::{
    ActiveModel as HomeworkActiveModel, Entity as Homeworks, Model as HomeworkModel,
};
pub use super::solutions::{
    ActiveModel as SolutionActiveModel, Entity as Solutions, Model as SolutionModel,
};
pub use super::tasks::{ActiveModel as TaskActiveModel, Entity as Tasks, Model as TaskModel};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
