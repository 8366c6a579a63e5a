//! LLM 服务 - 业务能力层
//!
//! 只负责"生成文本"能力，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（默认 x.ai）

use std::sync::OnceLock;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use regex::Regex;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, LlmError};
use crate::models::{ChatExchange, ChatRole};
use crate::services::provider::TextGenerator;
use crate::utils::logging::truncate_text;

/// 匹配第一个 ``` 代码块（可带 python 标记），非贪婪，`.` 可跨行
const FENCED_BLOCK_PATTERN: &str = r"(?s)```(?:python)?\n(.*?)\n```";

/// LLM 服务
///
/// 职责：
/// - 把 prompt 包装成固定的两条消息请求
/// - 调用 chat completion API
/// - 从回复中提取正文
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.api_key)
            .with_api_base(&config.api_base_url);

        let client = Client::with_config(openai_config);

        Self {
            client,
            model_name: config.model.clone(),
        }
    }

    /// 发送一次对话请求，返回第一个 choice 的原始内容
    pub async fn send_exchange(&self, exchange: &ChatExchange) -> AppResult<String> {
        debug!("调用 LLM API，模型: {}", exchange.model);
        if let Ok(json) = serde_json::to_string(exchange) {
            debug!("请求内容: {}", truncate_text(&json, 400));
        }

        let request =
            build_request(exchange).map_err(|source| LlmError::RequestBuildFailed { source })?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            AppError::llm_api_failed(&exchange.model, e)
        })?;

        debug!("LLM API 调用成功");

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::EmptyResponse {
                model: exchange.model.clone(),
            })?;

        let content = choice.message.content.ok_or_else(|| LlmError::EmptyContent {
            model: exchange.model.clone(),
        })?;

        Ok(content)
    }
}

#[async_trait]
impl TextGenerator for LlmService {
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        let exchange = ChatExchange::paper_request(&self.model_name, prompt);
        let reply = self.send_exchange(&exchange).await?;
        Ok(extract_text(&reply))
    }
}

/// 把 [`ChatExchange`] 转成 async-openai 的请求
fn build_request(exchange: &ChatExchange) -> Result<CreateChatCompletionRequest, OpenAIError> {
    let mut messages = Vec::with_capacity(exchange.messages.len());

    for message in &exchange.messages {
        let converted = match message.role {
            ChatRole::System => ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(message.content.as_str())
                    .build()?,
            ),
            ChatRole::User => ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(message.content.as_str())
                    .build()?,
            ),
        };
        messages.push(converted);
    }

    CreateChatCompletionRequestArgs::default()
        .model(&exchange.model)
        .messages(messages)
        .build()
}

fn fenced_block() -> Option<&'static Regex> {
    static FENCED_BLOCK: OnceLock<Option<Regex>> = OnceLock::new();
    FENCED_BLOCK
        .get_or_init(|| Regex::new(FENCED_BLOCK_PATTERN).ok())
        .as_ref()
}

/// 提取回复正文
///
/// 有代码块时返回第一个代码块的内容，否则返回整段回复；两种情况都去掉首尾空白
pub fn extract_text(reply: &str) -> String {
    if let Some(inner) = fenced_block()
        .and_then(|re| re.captures(reply))
        .and_then(|caps| caps.get(1))
    {
        return inner.as_str().trim().to_string();
    }
    reply.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chat::SYSTEM_PROMPT;

    #[test]
    fn test_extract_text_with_code_block() {
        let input = "Some text\n```python\nTitle: Test Paper\nAbstract: Test Abstract\n```";
        assert_eq!(extract_text(input), "Title: Test Paper\nAbstract: Test Abstract");
    }

    #[test]
    fn test_extract_text_without_code_block() {
        let input = "Title: Direct Text Paper\nAbstract: Direct Abstract";
        assert_eq!(extract_text(input), input);
    }

    #[test]
    fn test_extract_text_untagged_fence_and_surrounding_text() {
        assert_eq!(extract_text("pre\n```\n  BODY  \n```\npost"), "BODY");
        assert_eq!(extract_text("pre\n```python\nBODY\n```\npost"), "BODY");
    }

    #[test]
    fn test_extract_text_takes_first_block_non_greedy() {
        let input = "```\nfirst\n```\nmiddle\n```\nsecond\n```";
        assert_eq!(extract_text(input), "first");
    }

    #[test]
    fn test_extract_text_is_idempotent() {
        for input in [
            "  plain text  \n",
            "pre\n```python\nBODY\n```\npost",
            "```\nunterminated",
            "",
        ] {
            let once = extract_text(input);
            assert_eq!(extract_text(&once), once);
        }
    }

    #[test]
    fn test_build_request() {
        let exchange = ChatExchange::paper_request("grok-2-latest", "prompt body");
        let request = build_request(&exchange).unwrap();
        assert_eq!(request.model, "grok-2-latest");
        assert_eq!(request.messages.len(), 2);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][0]["content"], SYSTEM_PROMPT);
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "prompt body");
    }

    /// 测试真实 LLM 调用
    ///
    /// 运行方式：
    /// ```bash
    /// XAI_API_KEY=... cargo test test_generate_live -- --ignored --nocapture
    /// ```
    #[tokio::test]
    #[ignore]
    async fn test_generate_live() {
        let _ = tracing_subscriber::fmt::try_init();

        let config = Config::from_env().unwrap();
        let service = LlmService::new(&config);

        let result = service
            .generate("Write a three-sentence abstract about protein folding.")
            .await;

        match result {
            Ok(response) => {
                println!("\n========== LLM 响应 ==========");
                println!("{}", response);
                println!("==============================\n");
                assert!(!response.is_empty());
            }
            Err(e) => panic!("LLM 调用失败: {}", e),
        }
    }
}
