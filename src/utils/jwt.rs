//! JWT 工具
//!
//! 身份签发由外部会话服务完成；这里只负责校验 access token 并取出主体。
//! 签发函数保留给本地开发与测试使用。

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::errors::{CourseHubError, Result};

/// Access token 声明
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// 用户 ID
    pub sub: i64,
    /// 平台角色
    pub role: String,
    /// 过期时间（Unix 秒）
    pub exp: i64,
    /// 签发时间（Unix 秒）
    pub iat: i64,
}

pub struct JwtUtils;

impl JwtUtils {
    /// 生成 access token（本地开发/测试用）
    pub fn generate_access_token(user_id: i64, role: &str) -> Result<String> {
        let config = AppConfig::get();
        let now = chrono::Utc::now().timestamp();

        let claims = Claims {
            sub: user_id,
            role: role.to_string(),
            exp: now + config.jwt.access_token_expiry,
            iat: now,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(config.jwt.secret.as_bytes()),
        )
        .map_err(|e| CourseHubError::authentication(format!("生成 access token 失败: {e}")))
    }

    /// 校验 access token，返回声明
    pub fn verify_access_token(token: &str) -> Result<Claims> {
        let config = AppConfig::get();

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(config.jwt.secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|e| CourseHubError::authentication(format!("access token 校验失败: {e}")))?;

        Ok(data.claims)
    }
}
