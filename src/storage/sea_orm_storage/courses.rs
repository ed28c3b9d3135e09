//! 课程/课时/授权存储操作
//!
//! 课程与选课数据由协作方课程服务写入，本服务只做读取：
//! 课时排序供时间线使用，授权记录供 NotEnrolled 检查使用。

use super::SeaOrmStorage;
use crate::entity::course_users::{Column as CourseUserColumn, Entity as CourseUsers};
use crate::entity::courses::Entity as Courses;
use crate::entity::lessons::{Column as LessonColumn, Entity as Lessons};
use crate::errors::{CourseHubError, Result};
use crate::models::courses::entities::{Course, Enrollment};
use crate::models::lessons::entities::Lesson;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

impl SeaOrmStorage {
    /// 通过 ID 获取课程
    pub async fn get_course_by_id_impl(&self, course_id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 获取用户在课程中的授权记录
    pub async fn get_enrollment_impl(
        &self,
        course_id: i64,
        user_id: i64,
    ) -> Result<Option<Enrollment>> {
        let result = CourseUsers::find()
            .filter(CourseUserColumn::CourseId.eq(course_id))
            .filter(CourseUserColumn::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    /// 通过 ID 获取课时
    pub async fn get_lesson_by_id_impl(&self, lesson_id: i64) -> Result<Option<Lesson>> {
        let result = Lessons::find_by_id(lesson_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询课时失败: {e}")))?;

        Ok(result.map(|m| m.into_lesson()))
    }

    /// 列出课程的全部课时，按课程内位置排序
    pub async fn list_course_lessons_impl(&self, course_id: i64) -> Result<Vec<Lesson>> {
        let results = Lessons::find()
            .filter(LessonColumn::CourseId.eq(course_id))
            .order_by_asc(LessonColumn::Position)
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询课时列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_lesson()).collect())
    }
}
