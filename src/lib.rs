//! # Guwen Annotate
//!
//! 古文解析服务：把古文翻译、问答和实体标注请求转发给大模型
//!
//! ## 架构设计
//!
//! ### ① 外部调用层（Clients）
//! - `clients/` - 唯一的 I/O 边界
//! - `TextGenerator` - 文本生成能力，`LlmClient` 按模型别名选择服务商
//!
//! ### ② 标注修复层（Annotation）
//! - `annotation/` - 纯函数流水线，把不可靠的模型输出恢复成合法标注
//! - 清理 → 容错解析 → 校验定位 → 去重排序
//!
//! ### ③ 业务能力层（Services）
//! - `services/` - 翻译、问答、标注三种能力，以及对应的提示词
//!
//! ### ④ 接口层（Api）
//! - `api/` - axum 路由和 JSON 错误响应
//!
//! ## 模块结构

pub mod annotation;
pub mod api;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use annotation::{annotate_response, ParseError};
pub use clients::{LlmClient, TextGenerator};
pub use config::Config;
pub use error::{AppError, AppResult, ConfigError, LlmError};
pub use models::{AnnotationCandidate, AnnotationSet, EntityLabel, Span};
pub use services::GuwenService;
