use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 对话角色
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// 对话轮次
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub id: String,
    pub role: Role,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn new(role: Role, message: &str) -> Self {
        Self {
            id: format!("turn_{}", Uuid::new_v4()),
            role,
            message: message.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(message: &str) -> Self {
        Self::new(Role::User, message)
    }

    pub fn assistant(message: &str) -> Self {
        Self::new(Role::Assistant, message)
    }
}

/// 聊天回复
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub message: String,
    /// 命中的意图，未命中为 "unknown"
    pub intent: String,
    pub confidence: f64,
}
