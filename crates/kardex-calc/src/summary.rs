//! 異動類型彙總

use std::collections::BTreeMap;

use kardex_core::movement::OUTBOUND_MOVEMENT_TYPE;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::source::WindowedFacts;

/// 單一異動類型的彙總
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovementSummary {
    pub movement_type: String,
    pub count: usize,
    pub total_quantity: Decimal,
}

/// 依類型標籤彙總實際異動，並將窗口內的銷售明細併入「Salida」
///
/// 銷售明細來自不同資料表，但語意上屬於出庫；無產品ID的明細同樣計入。
/// 結果依類型標籤排序。
pub fn summarize_movements(facts: &WindowedFacts<'_>) -> Vec<MovementSummary> {
    let mut buckets: BTreeMap<&str, (usize, Decimal)> = BTreeMap::new();

    for movement in &facts.movements {
        let bucket = buckets
            .entry(movement.movement_type.as_str())
            .or_insert((0, Decimal::ZERO));
        bucket.0 += 1;
        bucket.1 += movement.quantity;
    }

    let (sale_count, sale_quantity) = facts
        .sale_lines()
        .fold((0usize, Decimal::ZERO), |(count, qty), (_, line)| {
            (count + 1, qty + line.quantity)
        });

    if sale_count > 0 {
        let bucket = buckets
            .entry(OUTBOUND_MOVEMENT_TYPE)
            .or_insert((0, Decimal::ZERO));
        bucket.0 += sale_count;
        bucket.1 += sale_quantity;
    }

    buckets
        .into_iter()
        .map(|(movement_type, (count, total_quantity))| MovementSummary {
            movement_type: movement_type.to_string(),
            count,
            total_quantity,
        })
        .collect()
}
