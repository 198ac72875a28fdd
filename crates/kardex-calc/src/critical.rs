//! 臨界庫存

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::enrichment::EnrichedStock;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriticalStockRow {
    pub product_id: i64,
    pub sku: String,
    pub product_name: String,
    /// 跨倉庫合計
    pub quantity: Decimal,
}

/// 合計數量 <= 門檻的產品，依數量遞增、名稱排序
pub fn critical_stock(stock: &[EnrichedStock], threshold: Decimal) -> Vec<CriticalStockRow> {
    let mut by_product: BTreeMap<i64, CriticalStockRow> = BTreeMap::new();

    for row in stock {
        by_product
            .entry(row.product_id)
            .or_insert_with(|| CriticalStockRow {
                product_id: row.product_id,
                sku: row.sku.clone(),
                product_name: row.product_name.clone(),
                quantity: Decimal::ZERO,
            })
            .quantity += row.quantity;
    }

    let mut critical: Vec<CriticalStockRow> = by_product
        .into_values()
        .filter(|row| row.quantity <= threshold)
        .collect();

    critical.sort_by(|a, b| {
        a.quantity
            .cmp(&b.quantity)
            .then_with(|| a.product_name.cmp(&b.product_name))
            .then(a.product_id.cmp(&b.product_id))
    });
    critical
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(product_id: i64, name: &str, warehouse_id: i64, qty: i64) -> EnrichedStock {
        EnrichedStock {
            product_id,
            sku: format!("P-{:03}", product_id),
            product_name: name.to_string(),
            warehouse_id,
            warehouse_name: format!("Bodega {}", warehouse_id),
            quantity: Decimal::from(qty),
            cost_price: Decimal::ZERO,
            net_sell_price: Decimal::ZERO,
        }
    }

    #[test]
    fn test_critical_stock_sums_across_warehouses() {
        let stock = vec![
            row(1, "Martillo", 1, 2),
            row(1, "Martillo", 2, 2), // 合計 4，不是臨界
            row(2, "Tuerca", 1, 3),   // 等於門檻
            row(3, "Alicate", 1, 3),
            row(4, "Lima", 1, 0),
            row(5, "Clavo", 1, -1),
        ];

        let critical = critical_stock(&stock, Decimal::from(3));

        let names: Vec<&str> = critical.iter().map(|r| r.product_name.as_str()).collect();
        assert_eq!(names, vec!["Clavo", "Lima", "Alicate", "Tuerca"]);
        assert_eq!(critical[0].quantity, Decimal::from(-1));
    }

    #[test]
    fn test_no_critical_stock() {
        let stock = vec![row(1, "Martillo", 1, 50)];
        assert!(critical_stock(&stock, Decimal::from(3)).is_empty());
    }
}
