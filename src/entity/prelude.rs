//! 预导入模块，方便使用

pub use super::assignments::{
    ActiveModel as AssignmentActiveModel, Entity as Assignments, Model as AssignmentModel,
};
pub use super::course_users::{
    ActiveModel as CourseUserActiveModel, Entity as CourseUsers, Model as CourseUserModel,
};
pub use super::courses::{
    ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel,
};
pub use super::lessons::{
    ActiveModel as LessonActiveModel, Entity as Lessons, Model as LessonModel,
};
pub use super::notifications::{
    ActiveModel as NotificationActiveModel, Entity as Notifications, Model as NotificationModel,
};
pub use super::submissions::{
    ActiveModel as SubmissionActiveModel, Entity as Submissions, Model as SubmissionModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
