//! 產品與倉庫維度

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 產品（目錄快照，唯讀）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// 產品ID
    pub id: i64,

    /// SKU（次要唯一標籤）
    pub sku: String,

    /// 名稱
    pub name: String,

    /// 成本價
    pub cost_price: Decimal,

    /// 售價
    pub sell_price: Decimal,

    /// 折扣百分比（0-100）
    pub discount_pct: Decimal,

    /// 是否啟用
    pub active: bool,
}

impl Product {
    /// 創建新的產品（預設啟用、無折扣）
    pub fn new(id: i64, sku: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            sku: sku.into(),
            name: name.into(),
            cost_price: Decimal::ZERO,
            sell_price: Decimal::ZERO,
            discount_pct: Decimal::ZERO,
            active: true,
        }
    }

    /// 建構器模式：設置成本價與售價
    pub fn with_prices(mut self, cost_price: Decimal, sell_price: Decimal) -> Self {
        self.cost_price = cost_price;
        self.sell_price = sell_price;
        self
    }

    /// 建構器模式：設置折扣百分比
    pub fn with_discount_pct(mut self, discount_pct: Decimal) -> Self {
        self.discount_pct = discount_pct;
        self
    }

    /// 建構器模式：設置為停用
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// 折扣後單位售價
    pub fn net_sell_price(&self) -> Decimal {
        self.sell_price * (Decimal::ONE - self.discount_pct / Decimal::ONE_HUNDRED)
    }
}

/// 倉庫（唯讀）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    /// 倉庫ID
    pub id: i64,

    /// 名稱
    pub name: String,

    /// 是否啟用
    pub active: bool,
}

impl Warehouse {
    /// 創建新的倉庫
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            active: true,
        }
    }

    /// 建構器模式：設置為停用
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_product() {
        let product = Product::new(1, "P-001", "Tornillo")
            .with_prices(Decimal::from(10), Decimal::from(20))
            .with_discount_pct(Decimal::from(10));

        assert_eq!(product.sku, "P-001");
        assert!(product.active);
        assert_eq!(product.net_sell_price(), Decimal::from(18));
    }

    #[test]
    fn test_inactive_builders() {
        assert!(!Product::new(2, "P-002", "Tuerca").inactive().active);
        assert!(!Warehouse::new(1, "Central").inactive().active);
    }
}
