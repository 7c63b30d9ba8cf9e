//! 核心数据模型模块
//!
//! 定义 SeizureGuard 的核心数据结构：特征向量、分类结果、症状报告、
//! 医生条目与对话轮次。

pub mod classification;
pub mod conversation;
pub mod feature;
pub mod processed_file;
pub mod provider;
pub mod symptom;

pub use classification::*;
pub use conversation::*;
pub use feature::*;
pub use processed_file::*;
pub use provider::*;
pub use symptom::*;
