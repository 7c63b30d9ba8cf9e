//! 对话服务
//!
//! 按顺序匹配正则表，命中第一条即返回对应的固定回复；
//! 全部未命中返回默认帮助文本。对话记录只追加，显式清空。

pub mod responses;

use parking_lot::Mutex;
use regex::Regex;
use std::sync::Arc;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::models::conversation::{ChatReply, ConversationTurn};

/// 命中意图时的置信度
pub const MATCHED_CONFIDENCE: f64 = 0.85;
/// 默认回复的置信度
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// 对话意图
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatIntent {
    Greeting,
    SeizureInfo,
    Symptoms,
    Emergency,
    Treatment,
    Prevention,
    FirstAid,
    Types,
    Diagnosis,
    Lifestyle,
    Safety,
}

impl ChatIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatIntent::Greeting => "greeting",
            ChatIntent::SeizureInfo => "seizure_info",
            ChatIntent::Symptoms => "symptoms",
            ChatIntent::Emergency => "emergency",
            ChatIntent::Treatment => "treatment",
            ChatIntent::Prevention => "prevention",
            ChatIntent::FirstAid => "first_aid",
            ChatIntent::Types => "types",
            ChatIntent::Diagnosis => "diagnosis",
            ChatIntent::Lifestyle => "lifestyle",
            ChatIntent::Safety => "safety",
        }
    }

    /// 意图对应的回复文本
    pub fn render(&self) -> String {
        match self {
            ChatIntent::Greeting => responses::GREETING.to_string(),
            ChatIntent::SeizureInfo => responses::SEIZURE_INFO.to_string(),
            ChatIntent::Symptoms => responses::symptoms(),
            ChatIntent::Emergency => responses::EMERGENCY.to_string(),
            ChatIntent::Treatment => responses::TREATMENT.to_string(),
            ChatIntent::Prevention => responses::prevention(),
            ChatIntent::FirstAid => responses::FIRST_AID.to_string(),
            ChatIntent::Types => responses::types(),
            ChatIntent::Diagnosis => responses::DIAGNOSIS.to_string(),
            ChatIntent::Lifestyle => responses::LIFESTYLE.to_string(),
            ChatIntent::Safety => responses::SAFETY.to_string(),
        }
    }
}

/// 匹配顺序即优先级
const INTENT_PATTERNS: [(&str, ChatIntent); 11] = [
    (r"\b(hi|hello|hey|greetings)\b", ChatIntent::Greeting),
    (
        r"\b(what is|what are|tell me about|explain)\s+(seizure|epilepsy)\b",
        ChatIntent::SeizureInfo,
    ),
    (r"\b(symptom|sign|warning)\b", ChatIntent::Symptoms),
    (r"\b(emergency|urgent|help|911)\b", ChatIntent::Emergency),
    (r"\b(treatment|medication|medicine|cure)\b", ChatIntent::Treatment),
    (r"\b(prevent|avoid|trigger)\b", ChatIntent::Prevention),
    (r"\b(first aid|what to do|how to help)\b", ChatIntent::FirstAid),
    (r"\b(type|kind|category)\b.*\b(seizure)\b", ChatIntent::Types),
    (r"\b(diagnos|test|eeg)\b", ChatIntent::Diagnosis),
    (r"\b(living|lifestyle|daily life)\b", ChatIntent::Lifestyle),
    (r"\b(safety|safe|precaution)\b", ChatIntent::Safety),
];

/// 规则对话机器人
pub struct SeizureChatbot {
    patterns: Vec<(Regex, ChatIntent)>,
    history: Mutex<Vec<ConversationTurn>>,
}

impl SeizureChatbot {
    pub fn new() -> Result<Self> {
        let patterns = INTENT_PATTERNS
            .iter()
            .map(|(pattern, intent)| {
                Regex::new(pattern)
                    .map(|re| (re, *intent))
                    .map_err(|e| AppError::Internal(format!("invalid intent pattern: {}", e)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            patterns,
            history: Mutex::new(Vec::new()),
        })
    }

    /// 识别意图
    pub fn classify(&self, message: &str) -> Option<ChatIntent> {
        let message = message.trim().to_lowercase();
        self.patterns
            .iter()
            .find(|(re, _)| re.is_match(&message))
            .map(|(_, intent)| *intent)
    }

    /// 生成回复，不写入对话记录
    pub fn respond(&self, message: &str) -> ChatReply {
        match self.classify(message) {
            Some(intent) => ChatReply {
                message: intent.render(),
                intent: intent.as_str().to_string(),
                confidence: MATCHED_CONFIDENCE,
            },
            None => ChatReply {
                message: responses::DEFAULT.to_string(),
                intent: "unknown".to_string(),
                confidence: DEFAULT_CONFIDENCE,
            },
        }
    }

    /// 生成回复并追加用户与助手两条记录
    pub fn chat(&self, message: &str) -> ChatReply {
        let reply = self.respond(message);
        debug!("Chat intent: {} ({})", reply.intent, reply.confidence);

        let mut history = self.history.lock();
        history.push(ConversationTurn::user(message));
        history.push(ConversationTurn::assistant(&reply.message));
        reply
    }

    /// 对话记录快照
    pub fn history(&self) -> Vec<ConversationTurn> {
        self.history.lock().clone()
    }

    pub fn clear(&self) {
        self.history.lock().clear();
    }
}

pub fn create_chatbot() -> Result<Arc<SeizureChatbot>> {
    Ok(Arc::new(SeizureChatbot::new()?))
}
