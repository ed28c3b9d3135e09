//! 数据模型定义
//!
//! 业务实体、请求/响应 DTO，与 entity 模块中的数据库实体分离。

pub mod assignments;
pub mod common;
pub mod courses;
pub mod lessons;
pub mod notifications;
pub mod submissions;
pub mod timeline;
pub mod users;

pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

/// 业务错误码，随 ApiResponse 返回给前端
///
/// 约定：0 表示成功；400xx 参数/校验错误；401xx 未认证；403xx 无权限；
/// 404xx 资源不存在；409xx 并发冲突；500xx 服务端错误。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 40000,
    SubmissionEmpty = 40001,
    DeadlinePassed = 40002,
    ScoreOutOfRange = 40003,
    AssignmentInvalid = 40004,

    Unauthorized = 40100,

    Forbidden = 40300,
    NotEnrolled = 40301,

    NotFound = 40400,
    CourseNotFound = 40401,
    LessonNotFound = 40402,
    AssignmentNotFound = 40403,
    SubmissionNotFound = 40404,
    NotificationNotFound = 40405,

    GradeConflict = 40900,
    SubmissionConflict = 40901,

    InternalServerError = 50000,
}

/// 程序启动时间，用于统计预处理耗时
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
