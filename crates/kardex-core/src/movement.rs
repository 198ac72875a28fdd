//! 庫存異動模型

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 出庫異動的類型標籤
pub const OUTBOUND_MOVEMENT_TYPE: &str = "Salida";

/// 庫存異動（實際記錄）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementRecord {
    /// 異動ID（單調遞增）
    pub id: i64,

    /// 發生時間
    pub timestamp: NaiveDateTime,

    /// 產品ID
    pub product_id: i64,

    /// 倉庫ID
    pub warehouse_id: i64,

    /// 異動類型（自由標籤，如入庫/出庫/調整）
    pub movement_type: String,

    /// 數量
    pub quantity: Decimal,

    /// 原因
    pub reason: Option<String>,

    /// 參考類型標籤
    pub reference_type: Option<String>,

    /// 操作者
    pub user_id: Option<i64>,
}

impl MovementRecord {
    /// 創建新的異動記錄
    pub fn new(
        id: i64,
        timestamp: NaiveDateTime,
        product_id: i64,
        warehouse_id: i64,
        movement_type: impl Into<String>,
        quantity: Decimal,
    ) -> Self {
        Self {
            id,
            timestamp,
            product_id,
            warehouse_id,
            movement_type: movement_type.into(),
            quantity,
            reason: None,
            reference_type: None,
            user_id: None,
        }
    }

    /// 建構器模式：設置原因
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// 建構器模式：設置參考類型
    pub fn with_reference_type(mut self, reference_type: impl Into<String>) -> Self {
        self.reference_type = Some(reference_type.into());
        self
    }

    /// 建構器模式：設置操作者
    pub fn with_user_id(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// 檢查是否為出庫異動
    pub fn is_outbound(&self) -> bool {
        self.movement_type == OUTBOUND_MOVEMENT_TYPE
    }
}
