//! 古文解析服务 - 业务能力层
//!
//! 只负责"翻译 / 问答 / 标注"三种能力，不关心 HTTP

use tracing::{debug, info, warn};

use super::prompts;
use crate::annotation::annotate_response;
use crate::clients::TextGenerator;
use crate::config::Config;
use crate::error::{AppResult, LlmError};
use crate::models::AnnotationSet;
use crate::utils::truncate_text;

/// 古文解析服务
///
/// 职责：
/// - 构建提示词并调用 LLM
/// - 把标注结果交给修复流水线
/// - 不持有可变状态，可在多个请求间共享
pub struct GuwenService<G> {
    generator: G,
    default_model: String,
    annotate_model: String,
}

impl<G: TextGenerator> GuwenService<G> {
    pub fn new(generator: G, config: &Config) -> Self {
        Self {
            generator,
            default_model: config.llm.default_model.clone(),
            annotate_model: config.llm.annotate_model.clone(),
        }
    }

    fn model_or_default<'a>(&'a self, model: Option<&'a str>) -> &'a str {
        model.unwrap_or(&self.default_model)
    }

    /// 将古文翻译成现代汉语
    pub async fn translate(&self, text: &str, model: Option<&str>) -> Result<String, LlmError> {
        let model = self.model_or_default(model);
        info!("📜 翻译请求，模型: {}, 原文: {}", model, truncate_text(text, 40));
        self.generator
            .generate_response(&prompts::translation_prompt(text), model)
            .await
    }

    /// 针对原文回答问题
    pub async fn answer(
        &self,
        text: &str,
        question: &str,
        model: Option<&str>,
    ) -> Result<String, LlmError> {
        let model = self.model_or_default(model);
        info!("❓ 问答请求，模型: {}, 问题: {}", model, truncate_text(question, 40));
        self.generator
            .generate_response(&prompts::qa_prompt(text, question), model)
            .await
    }

    /// 自动实体标注
    ///
    /// # 返回
    /// 去重排序后的标注；LLM 调用失败或返回内容无法解析时返回错误
    pub async fn auto_annotate(&self, text: &str) -> AppResult<AnnotationSet> {
        info!("🏷️ 标注请求，模型: {}, 原文长度: {} 字", self.annotate_model, text.chars().count());

        let response = self
            .generator
            .generate_response(&prompts::annotation_prompt(text), &self.annotate_model)
            .await?;
        debug!("标注原始响应: {}", truncate_text(&response, 200));

        let annotations = annotate_response(&response, text).map_err(|e| {
            warn!("标注结果解析失败: {}", e);
            e
        })?;

        info!("✓ 标注完成，共 {} 处", annotations.len());
        Ok(annotations)
    }
}
