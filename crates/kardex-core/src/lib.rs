//! # Kardex Core
//!
//! 核心資料模型與類型定義

pub mod config;
pub mod inventory;
pub mod movement;
pub mod product;
pub mod sale;
pub mod window;

// Re-export 主要類型
pub use config::{AnalyticsConfig, MAX_SYNTHETIC_ID_OFFSET};
pub use inventory::InventoryRecord;
pub use movement::MovementRecord;
pub use product::{Product, Warehouse};
pub use sale::{SaleLineRecord, SaleRecord, SaleStatus};
pub use window::TimeWindow;

/// 分析引擎錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("資料來源錯誤: {0}")]
    Source(String),

    #[error("無效的配置: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;
