use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use serde::Deserialize;
use tracing::info;

use crate::models::{ApiResponse, ErrorCode};
use crate::services::websocket::WebSocketService;
use crate::utils::jwt::JwtUtils;

/// WebSocket 连接查询参数
///
/// 浏览器的 WebSocket API 无法自定义请求头，令牌从查询参数传入，
/// 用与 HTTP 同一套 JWT 校验。
#[derive(Debug, Deserialize)]
pub struct WsConnectQuery {
    pub token: String,
}

// 建立实时通知连接
pub async fn connect(
    req: HttpRequest,
    query: web::Query<WsConnectQuery>,
    stream: web::Payload,
) -> ActixResult<HttpResponse> {
    let claims = match JwtUtils::verify_access_token(&query.token) {
        Ok(claims) => claims,
        Err(e) => {
            info!("WebSocket token validation failed: {}", e);
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    let (response, session, msg_stream) = actix_ws::handle(&req, stream)?;

    actix_web::rt::spawn(WebSocketService::handle_connection(
        claims.sub, session, msg_stream,
    ));

    Ok(response)
}

// 配置路由
pub fn configure_websocket_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/v1/ws").route("", web::get().to(connect)));
}
