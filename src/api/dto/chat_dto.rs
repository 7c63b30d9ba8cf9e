//! 对话 DTO

use serde::{Deserialize, Serialize};

use crate::models::conversation::{ChatReply, ConversationTurn};

/// 对话请求
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ChatRequest {
    pub message: Option<String>,
}

/// 对话响应
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub success: bool,
    pub response: ChatReply,
}

/// 对话历史响应
#[derive(Debug, Serialize)]
pub struct ChatHistoryResponse {
    pub success: bool,
    pub count: usize,
    pub history: Vec<ConversationTurn>,
}

/// 清空历史响应
#[derive(Debug, Serialize)]
pub struct ClearHistoryResponse {
    pub success: bool,
    pub message: String,
}
