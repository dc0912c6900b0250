//! HTTP 接口模块
//!
//! 只负责请求解析和响应格式，业务逻辑在 `services` 中

pub mod error;
pub mod handlers;
pub mod router;

pub use error::{ApiError, ErrorBody};
pub use router::router;
