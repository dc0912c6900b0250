pub mod llm_client;

pub use llm_client::{GenerationParams, LlmClient, Route, TextGenerator, XUNZI_CLOUD, XUNZI_QWEN2};
