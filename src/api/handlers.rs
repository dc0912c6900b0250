//! 接口处理函数
//!
//! - `POST /api/analyze` — 古文翻译
//! - `POST /api/qa` — 古文问答
//! - `POST /api/auto-annotate` — 自动实体标注

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use crate::clients::TextGenerator;
use crate::models::AnnotationSet;
use crate::services::GuwenService;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QaRequest {
    pub text: Option<String>,
    pub question: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnnotateRequest {
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TextResponse {
    pub result: String,
}

#[derive(Debug, Serialize)]
pub struct AnnotateResponse {
    pub annotations: AnnotationSet,
}

/// 请求体无法解析时按缺少字段处理
fn body_or<T>(payload: Result<Json<T>, JsonRejection>, message: &'static str) -> Result<T, ApiError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            tracing::debug!("请求体解析失败: {}", rejection);
            Err(ApiError::BadRequest(message))
        }
    }
}

/// `POST /api/analyze` — 将古文翻译成现代汉语
pub async fn analyze<G: TextGenerator>(
    State(service): State<Arc<GuwenService<G>>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<TextResponse>, ApiError> {
    const MISSING: &str = "请提供要分析的文本";
    let req = body_or(payload, MISSING)?;
    let text = req.text.ok_or(ApiError::BadRequest(MISSING))?;

    let result = service.translate(&text, req.model.as_deref()).await?;
    Ok(Json(TextResponse { result }))
}

/// `POST /api/qa` — 针对原文回答问题
pub async fn qa<G: TextGenerator>(
    State(service): State<Arc<GuwenService<G>>>,
    payload: Result<Json<QaRequest>, JsonRejection>,
) -> Result<Json<TextResponse>, ApiError> {
    const MISSING: &str = "请提供原文和问题";
    let req = body_or(payload, MISSING)?;
    let (Some(text), Some(question)) = (req.text, req.question) else {
        return Err(ApiError::BadRequest(MISSING));
    };

    let result = service
        .answer(&text, &question, req.model.as_deref())
        .await?;
    Ok(Json(TextResponse { result }))
}

/// `POST /api/auto-annotate` — 自动实体标注
pub async fn auto_annotate<G: TextGenerator>(
    State(service): State<Arc<GuwenService<G>>>,
    payload: Result<Json<AnnotateRequest>, JsonRejection>,
) -> Result<Json<AnnotateResponse>, ApiError> {
    const MISSING: &str = "请提供要标注的文本";
    let req = body_or(payload, MISSING)?;
    let text = req.text.ok_or(ApiError::BadRequest(MISSING))?;

    let annotations = service.auto_annotate(&text).await?;
    Ok(Json(AnnotateResponse { annotations }))
}
