//! HTTP 错误响应
//!
//! 所有错误都以 `{"error": "..."}` 返回；标注结果解析失败时附带
//! `raw_response` 和 `cleaned` 便于排查模型输出。

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::error::{AppError, LlmError};

/// 错误响应体
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleaned: Option<String>,
}

/// 接口层错误
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 请求缺少必要字段或无法解析
    #[error("{0}")]
    BadRequest(&'static str),
    /// 翻译或问答时调用 LLM 失败
    #[error("生成回复时出错: {0}")]
    Generation(#[from] LlmError),
    /// 自动标注失败
    #[error("自动标注时出错: {0}")]
    Annotation(#[from] AppError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Generation(_) | ApiError::Annotation(_) => {
                tracing::error!("{}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let (raw_response, cleaned) = match &self {
            ApiError::Annotation(AppError::Parse(e)) => {
                (Some(e.raw.clone()), Some(e.sanitized.clone()))
            }
            _ => (None, None),
        };

        let body = ErrorBody {
            error: self.to_string(),
            raw_response,
            cleaned,
        };

        (status, Json(body)).into_response()
    }
}
