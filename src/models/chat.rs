//! 对话请求数据结构
//!
//! 与具体 SDK 无关，便于离线测试 prompt 的组装结果

use serde::Serialize;

/// 论文生成固定使用的系统消息
pub const SYSTEM_PROMPT: &str = "You are an AI research paper generator.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// 一次完整的对话请求：模型 + 消息列表
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatExchange {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

impl ChatExchange {
    /// 系统消息 + 用户 prompt 的两条消息请求
    pub fn paper_request(model: impl Into<String>, prompt: &str) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paper_request_shape() {
        let exchange = ChatExchange::paper_request("grok-2-latest", "写一篇论文");
        assert_eq!(exchange.model, "grok-2-latest");
        assert_eq!(exchange.messages.len(), 2);
        assert_eq!(exchange.messages[0], ChatMessage::system(SYSTEM_PROMPT));
        assert_eq!(exchange.messages[1].role, ChatRole::User);
        assert_eq!(exchange.messages[1].content, "写一篇论文");
    }

    #[test]
    fn test_serializes_like_the_wire_format() {
        let exchange = ChatExchange::paper_request("m", "p");
        let json = serde_json::to_value(&exchange).unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "p");
    }
}
