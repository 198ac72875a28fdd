//! 呆滯品偵測

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::activity::ProductActivity;
use crate::enrichment::DimensionLookup;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeadStockRow {
    pub product_id: i64,
    pub sku: String,
    pub product_name: String,
    pub current_stock: Decimal,
}

/// 窗口內沒有銷售也沒有實際異動的啟用產品，依名稱排序，取前 `cap` 筆
pub fn dead_stock(
    lookup: &DimensionLookup,
    activity: &ProductActivity,
    stock: &BTreeMap<i64, Decimal>,
    cap: usize,
) -> Vec<DeadStockRow> {
    let mut rows: Vec<DeadStockRow> = lookup
        .active_products()
        .into_iter()
        .filter(|p| activity.sold_qty(p.id).is_zero() && activity.movement_count(p.id) == 0)
        .map(|p| DeadStockRow {
            product_id: p.id,
            sku: p.sku.clone(),
            product_name: p.name.clone(),
            current_stock: stock.get(&p.id).copied().unwrap_or(Decimal::ZERO),
        })
        .collect();

    rows.sort_by(|a, b| {
        a.product_name
            .cmp(&b.product_name)
            .then(a.product_id.cmp(&b.product_id))
    });
    rows.truncate(cap);
    rows
}
