//! 銷售模型

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 銷售狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaleStatus {
    /// 已登記
    Registered,
    /// 已作廢
    Voided,
}

/// 銷售單（表頭）
///
/// 金額欄位隨資料帶入，引擎只使用日期與狀態。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    /// 銷售ID
    pub id: i64,

    /// 銷售日期
    pub date: NaiveDateTime,

    /// 狀態
    pub status: SaleStatus,

    /// 小計
    pub subtotal: Decimal,

    /// 折扣
    pub discount: Decimal,

    /// 總計
    pub total: Decimal,
}

impl SaleRecord {
    /// 創建新的銷售單（已登記、金額為零）
    pub fn new(id: i64, date: NaiveDateTime) -> Self {
        Self {
            id,
            date,
            status: SaleStatus::Registered,
            subtotal: Decimal::ZERO,
            discount: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }

    /// 建構器模式：設置金額
    pub fn with_amounts(mut self, subtotal: Decimal, discount: Decimal, total: Decimal) -> Self {
        self.subtotal = subtotal;
        self.discount = discount;
        self.total = total;
        self
    }

    /// 建構器模式：設置為作廢
    pub fn voided(mut self) -> Self {
        self.status = SaleStatus::Voided;
        self
    }

    /// 檢查是否已作廢
    pub fn is_voided(&self) -> bool {
        self.status == SaleStatus::Voided
    }
}

/// 銷售明細
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleLineRecord {
    /// 所屬銷售ID
    pub sale_id: i64,

    /// 產品ID（產品刪除後可能為空）
    pub product_id: Option<i64>,

    /// 倉庫ID
    pub warehouse_id: i64,

    /// 數量
    pub quantity: Decimal,

    /// 單價
    pub unit_price: Decimal,
}

impl SaleLineRecord {
    /// 創建新的銷售明細
    pub fn new(sale_id: i64, product_id: Option<i64>, warehouse_id: i64, quantity: Decimal) -> Self {
        Self {
            sale_id,
            product_id,
            warehouse_id,
            quantity,
            unit_price: Decimal::ZERO,
        }
    }

    /// 建構器模式：設置單價
    pub fn with_unit_price(mut self, unit_price: Decimal) -> Self {
        self.unit_price = unit_price;
        self
    }
}
