//! 请求参数错误处理器
//!
//! 将 actix 的 JSON/Query 反序列化错误转成统一的 ApiResponse 结构，
//! 避免把 serde 的原始报错直接抛给前端。

use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::{Error, HttpRequest, HttpResponse};
use tracing::debug;

use crate::models::{ApiResponse, ErrorCode};

/// JSON 请求体解析错误处理
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    debug!("JSON payload error on {}: {}", req.path(), err);

    let message = match &err {
        JsonPayloadError::ContentType => "请求 Content-Type 必须为 application/json".to_string(),
        JsonPayloadError::Deserialize(e) => format!("请求体格式错误: {e}"),
        JsonPayloadError::OverflowKnownLength { length, limit } => {
            format!("请求体过大: {length} > {limit}")
        }
        JsonPayloadError::Overflow { limit } => format!("请求体超过限制: {limit}"),
        other => format!("请求体解析失败: {other}"),
    };

    let response =
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message));

    InternalError::from_response(err, response).into()
}

/// Query 参数解析错误处理
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> Error {
    debug!("Query payload error on {}: {}", req.path(), err);

    let message = match &err {
        QueryPayloadError::Deserialize(e) => format!("查询参数格式错误: {e}"),
        other => format!("查询参数解析失败: {other}"),
    };

    let response =
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message));

    InternalError::from_response(err, response).into()
}
