//! 存储层模块
//!
//! 启动时加载的只读数据源。

pub mod provider_store;

pub use provider_store::ProviderStore;
