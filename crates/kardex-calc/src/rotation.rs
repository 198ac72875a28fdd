//! 週轉率與覆蓋天數

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::Serialize;

use crate::activity::ProductActivity;
use crate::enrichment::DimensionLookup;
use crate::rounding::{round_half_away, CONSUMPTION_DP, COVERAGE_DP, ROTATION_DP};

/// 週轉率列
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RotationRow {
    pub product_id: i64,
    pub sku: String,
    pub product_name: String,
    pub sold_qty: Decimal,
    pub current_stock: Decimal,
    /// 銷售量 / max(庫存, 1)
    pub rotation: Decimal,
}

/// 覆蓋天數列
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageRow {
    pub product_id: i64,
    pub sku: String,
    pub product_name: String,
    pub current_stock: Decimal,
    pub sold_qty: Decimal,
    /// 日均消耗
    pub consumption_per_day: Decimal,
    /// 現有庫存可支撐的天數；無消耗時為 0
    pub coverage_days: Decimal,
}

/// 週轉率：`sold / max(stock, 1)`
///
/// 庫存耗盡（<= 0）時結果即為銷售量本身，不捨入；其餘捨入到 2 位。
pub fn rotation_value(sold_qty: Decimal, current_stock: Decimal) -> Decimal {
    if current_stock <= Decimal::ZERO {
        return sold_qty;
    }
    round_half_away(sold_qty / current_stock.max(Decimal::ONE), ROTATION_DP)
}

/// 日均消耗與覆蓋天數（皆已捨入）
///
/// 覆蓋天數以未捨入的日均消耗計算。
pub fn coverage_values(
    sold_qty: Decimal,
    current_stock: Decimal,
    window_length_days: i64,
) -> (Decimal, Decimal) {
    let days = Decimal::from(window_length_days.max(1));
    let per_day = sold_qty / days;

    let coverage = if per_day > Decimal::ZERO && current_stock > Decimal::ZERO {
        current_stock.checked_div(per_day).unwrap_or(Decimal::MAX)
    } else {
        Decimal::ZERO
    };

    (
        round_half_away(per_day, CONSUMPTION_DP),
        round_half_away(coverage, COVERAGE_DP),
    )
}

/// 週轉率排行
///
/// 略過銷售量與庫存皆 <= 0 的產品；依週轉率遞減、名稱遞增排序，取前 `cap` 筆。
pub fn rotation_index(
    stock: &BTreeMap<i64, Decimal>,
    activity: &ProductActivity,
    lookup: &DimensionLookup,
    cap: usize,
) -> Vec<RotationRow> {
    let products: BTreeSet<i64> = stock.keys().copied().chain(activity.sold_products()).collect();

    let mut rows: Vec<RotationRow> = products
        .into_iter()
        .filter_map(|product_id| {
            let sold_qty = activity.sold_qty(product_id);
            let current_stock = stock.get(&product_id).copied().unwrap_or(Decimal::ZERO);

            if sold_qty <= Decimal::ZERO && current_stock <= Decimal::ZERO {
                return None;
            }

            let product = lookup.product(product_id);
            Some(RotationRow {
                product_id,
                sku: product.sku,
                product_name: product.name,
                sold_qty,
                current_stock,
                rotation: rotation_value(sold_qty, current_stock),
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        b.rotation
            .cmp(&a.rotation)
            .then_with(|| a.product_name.cmp(&b.product_name))
            .then(a.product_id.cmp(&b.product_id))
    });
    rows.truncate(cap);
    rows
}

/// 覆蓋天數排行
///
/// 只列庫存 > 0 的產品；依覆蓋天數遞增（最快耗盡者優先）排序，取前 `cap` 筆。
pub fn coverage_days(
    stock: &BTreeMap<i64, Decimal>,
    activity: &ProductActivity,
    lookup: &DimensionLookup,
    window_length_days: i64,
    cap: usize,
) -> Vec<CoverageRow> {
    let mut rows: Vec<CoverageRow> = stock
        .iter()
        .filter(|(_, qty)| **qty > Decimal::ZERO)
        .map(|(&product_id, &current_stock)| {
            let sold_qty = activity.sold_qty(product_id);
            let (consumption_per_day, coverage_days) =
                coverage_values(sold_qty, current_stock, window_length_days);
            let product = lookup.product(product_id);
            CoverageRow {
                product_id,
                sku: product.sku,
                product_name: product.name,
                current_stock,
                sold_qty,
                consumption_per_day,
                coverage_days,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        a.coverage_days
            .cmp(&b.coverage_days)
            .then_with(|| a.product_name.cmp(&b.product_name))
            .then(a.product_id.cmp(&b.product_id))
    });
    rows.truncate(cap);
    rows
}
