//! LLM API 客户端
//!
//! 按模型别名选择服务商端点，发送 OpenAI 兼容的 chat/completions 请求。
//!
//! ## 技术栈
//! - 请求体使用 `async-openai` 的类型构建
//! - 通过 `reqwest` 发送，便于拿到非 2xx 响应的原始内容并校验返回格式

use std::future::Future;
use std::time::Duration;

use async_openai::types::chat::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest,
    CreateChatCompletionRequestArgs, CreateChatCompletionResponse,
};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::{Config, ProviderConfig};
use crate::error::LlmError;
use crate::utils::logging::truncate_text;

/// 默认模型别名：荀子古汉语模型
pub const XUNZI_QWEN2: &str = "xunzi-qwen2";
/// 荀子云端模型别名
pub const XUNZI_CLOUD: &str = "xunzi-cloud";

/// 荀子模型单次生成的 token 上限
const XUNZI_MAX_TOKENS: u32 = 1024;

const XUNZI_SYSTEM_PROMPT: &str = "你是一位精通古汉语的资深学者，专门研究先秦两汉至明清的古典文献。你具备以下专业能力：
1. 深厚的古汉语功底，熟悉文言文语法、词汇演变和修辞手法
2. 广博的古典文献知识，包括经史子集各类典籍
3. 对古代历史、文化、思想有深入理解
4. 能够准确解读古文含义，分析其思想内涵和历史背景
5. 你是基于qwen开发的荀子古汉语专用大模型

请用专业、严谨的态度回答问题，引用原文时注明出处，解释时兼顾字面意思和深层含义。";

/// 文本生成能力
///
/// 流水线之外唯一的 I/O 边界。HTTP 层只依赖这个 trait，测试时可以替换为假实现。
pub trait TextGenerator: Send + Sync + 'static {
    /// 发送提示词，返回模型生成的文本
    fn generate_response(
        &self,
        prompt: &str,
        model: &str,
    ) -> impl Future<Output = Result<String, LlmError>> + Send;
}

/// 生成参数，`None` 表示不发送该字段
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GenerationParams {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub top_p: Option<f32>,
}

/// 一次调用实际使用的端点和参数
#[derive(Debug, Clone)]
pub struct Route<'a> {
    /// 服务商显示名（用于日志和错误信息）
    pub provider: &'static str,
    pub endpoint: &'a ProviderConfig,
    /// 实际发送给服务商的模型名
    pub model: String,
    pub system_prompt: Option<&'static str>,
    pub params: GenerationParams,
}

/// LLM 客户端
pub struct LlmClient {
    http: reqwest::Client,
    config: Config,
}

impl LlmClient {
    /// 创建新的 LLM 客户端，超时时间取自配置
    pub fn new(config: &Config) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.llm.timeout_secs))
            .build()
            .map_err(|e| LlmError::RequestBuild {
                provider: "reqwest".to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    /// 根据模型别名选择服务商
    pub fn route(&self, alias: &str) -> Route<'_> {
        let llm = &self.config.llm;
        let providers = &llm.providers;
        let full_params = GenerationParams {
            temperature: Some(llm.temperature),
            max_tokens: Some(llm.max_tokens),
            top_p: Some(llm.top_p),
        };

        match alias {
            XUNZI_QWEN2 => Route {
                provider: "魔搭/荀子",
                endpoint: &providers.modelscope,
                model: providers.modelscope.model.clone(),
                system_prompt: Some(XUNZI_SYSTEM_PROMPT),
                // 荀子模型不支持部分采样参数，只发送 max_tokens
                params: GenerationParams {
                    max_tokens: Some(llm.max_tokens.min(XUNZI_MAX_TOKENS)),
                    ..GenerationParams::default()
                },
            },
            XUNZI_CLOUD => Route {
                provider: "荀子云端",
                endpoint: &providers.xunzi_cloud,
                model: providers.xunzi_cloud.model.clone(),
                system_prompt: None,
                params: full_params,
            },
            other => Route {
                provider: "DeepSeek",
                endpoint: &providers.deepseek,
                // 空别名回落到配置的 DeepSeek 模型
                model: match other.trim() {
                    "" => providers.deepseek.model.clone(),
                    name => name.to_string(),
                },
                system_prompt: None,
                params: full_params,
            },
        }
    }

    /// 构建 chat/completions 请求体
    pub fn build_request(
        route: &Route<'_>,
        prompt: &str,
    ) -> Result<CreateChatCompletionRequest, LlmError> {
        let build_err = |e: async_openai::error::OpenAIError| LlmError::RequestBuild {
            provider: route.provider.to_string(),
            message: e.to_string(),
        };

        let mut messages = Vec::new();

        if let Some(system_prompt) = route.system_prompt {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(system_prompt)
                .build()
                .map_err(build_err)?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(build_err)?;
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(&route.model).messages(messages);
        if let Some(temperature) = route.params.temperature {
            args.temperature(temperature);
        }
        if let Some(max_tokens) = route.params.max_tokens {
            args.max_tokens(max_tokens);
        }
        if let Some(top_p) = route.params.top_p {
            args.top_p(top_p);
        }

        args.build().map_err(build_err)
    }

    async fn send(&self, route: &Route<'_>, prompt: &str) -> Result<String, LlmError> {
        if route.endpoint.api_key.is_empty() {
            return Err(LlmError::missing_key(route.provider));
        }

        let request = Self::build_request(route, prompt)?;

        debug!("调用 {} API，模型: {}", route.provider, route.model);
        debug!("提示词长度: {} 字符", prompt.chars().count());

        let response = self
            .http
            .post(&route.endpoint.api_url)
            .bearer_auth(&route.endpoint.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("调用 {} API 失败: {}", route.provider, e);
                LlmError::transport(route.provider, e)
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::transport(route.provider, e))?;

        if !status.is_success() {
            warn!("{} API 返回 HTTP {}", route.provider, status.as_u16());
            return Err(LlmError::HttpStatus {
                provider: route.provider.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let content = extract_content(&body).ok_or_else(|| LlmError::MalformedEnvelope {
            provider: route.provider.to_string(),
            body: body.clone(),
        })?;

        debug!("{} API 调用成功: {}", route.provider, truncate_text(&content, 80));

        Ok(content)
    }
}

impl TextGenerator for LlmClient {
    async fn generate_response(&self, prompt: &str, model: &str) -> Result<String, LlmError> {
        let route = self.route(model);
        self.send(&route, prompt).await
    }
}

/// 部分兼容服务省略 id/created 等字段，标准响应解析失败时只读取所需部分
#[derive(Deserialize)]
struct LenientEnvelope {
    #[serde(default)]
    choices: Vec<LenientChoice>,
}

#[derive(Deserialize)]
struct LenientChoice {
    message: LenientMessage,
}

#[derive(Deserialize)]
struct LenientMessage {
    content: Option<String>,
}

/// 取出 `choices[0].message.content`，格式不符时返回 None
fn extract_content(body: &str) -> Option<String> {
    let content = match serde_json::from_str::<CreateChatCompletionResponse>(body) {
        Ok(response) => response.choices.into_iter().next()?.message.content?,
        Err(e) => {
            debug!("标准响应格式解析失败，改用宽松解析: {}", e);
            let envelope: LenientEnvelope = serde_json::from_str(body).ok()?;
            envelope.choices.into_iter().next()?.message.content?
        }
    };
    Some(content.trim().to_string())
}
