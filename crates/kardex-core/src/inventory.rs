//! 庫存模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 庫存記錄（產品 × 倉庫 → 數量）
///
/// 數量在一致的系統中不為負，但引擎不做此假設。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    /// 產品ID
    pub product_id: i64,

    /// 倉庫ID
    pub warehouse_id: i64,

    /// 現有庫存
    pub quantity: Decimal,
}

impl InventoryRecord {
    /// 創建新的庫存記錄
    pub fn new(product_id: i64, warehouse_id: i64, quantity: Decimal) -> Self {
        Self {
            product_id,
            warehouse_id,
            quantity,
        }
    }

    /// 複合鍵 (product_id, warehouse_id)
    pub fn key(&self) -> (i64, i64) {
        (self.product_id, self.warehouse_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_inventory_record() {
        let record = InventoryRecord::new(7, 2, Decimal::from(-4));

        assert_eq!(record.key(), (7, 2));
        // 負庫存照樣保留
        assert_eq!(record.quantity, Decimal::from(-4));
    }
}
