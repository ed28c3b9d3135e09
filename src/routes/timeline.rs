use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::services::TimelineService;

// 懒加载的全局 TimelineService 实例
static TIMELINE_SERVICE: Lazy<TimelineService> = Lazy::new(TimelineService::new_lazy);

// 获取我的课程时间线
pub async fn get_my_timeline(
    req: HttpRequest,
    path: web::Path<i64>, // course_id
) -> ActixResult<HttpResponse> {
    TIMELINE_SERVICE
        .get_student_timeline(&req, path.into_inner(), None)
        .await
}

// 获取指定学生的课程时间线（讲师视角）
pub async fn get_student_timeline(
    req: HttpRequest,
    path: web::Path<(i64, i64)>, // (course_id, student_id)
) -> ActixResult<HttpResponse> {
    let (course_id, student_id) = path.into_inner();
    TIMELINE_SERVICE
        .get_student_timeline(&req, course_id, Some(student_id))
        .await
}

// 配置路由
pub fn configure_timeline_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses/{course_id}/timeline")
            .wrap(middlewares::RequireAuth)
            .route("", web::get().to(get_my_timeline))
            .route("/{student_id}", web::get().to(get_student_timeline)),
    );
}
