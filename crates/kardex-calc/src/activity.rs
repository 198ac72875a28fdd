//! 窗口內的產品活動（銷售量、異動次數）

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;

use crate::source::WindowedFacts;

/// 產品活動統計
#[derive(Debug, Clone, Default)]
pub struct ProductActivity {
    sold: BTreeMap<i64, Decimal>,
    movement_counts: HashMap<i64, usize>,
}

impl ProductActivity {
    /// 從窗口內事實資料收集；無產品ID的明細無法歸屬，不計入
    pub fn collect(facts: &WindowedFacts<'_>) -> Self {
        let mut activity = Self::default();

        for (_, line) in facts.sale_lines() {
            if let Some(product_id) = line.product_id {
                *activity.sold.entry(product_id).or_insert(Decimal::ZERO) += line.quantity;
            }
        }

        for movement in &facts.movements {
            *activity.movement_counts.entry(movement.product_id).or_insert(0) += 1;
        }

        activity
    }

    /// 窗口內銷售量
    pub fn sold_qty(&self, product_id: i64) -> Decimal {
        self.sold.get(&product_id).copied().unwrap_or(Decimal::ZERO)
    }

    /// 窗口內實際異動次數
    pub fn movement_count(&self, product_id: i64) -> usize {
        self.movement_counts.get(&product_id).copied().unwrap_or(0)
    }

    /// 有銷售明細的產品（依ID排序）
    pub fn sold_products(&self) -> impl Iterator<Item = i64> + '_ {
        self.sold.keys().copied()
    }
}
