//! 庫存估值

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::enrichment::EnrichedStock;
use crate::rounding::round_money;

/// 單一倉庫的估值
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WarehouseValuation {
    pub warehouse_id: i64,
    pub warehouse_name: String,
    /// 成本值
    pub cost_value: Decimal,
    /// 售價值（扣除折扣）
    pub sell_value: Decimal,
    /// 毛利 = 售價值 - 成本值
    pub margin: Decimal,
}

/// 全部倉庫的估值合計
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValuationTotals {
    pub cost_value: Decimal,
    pub sell_value: Decimal,
    pub margin: Decimal,
}

/// 依倉庫彙總庫存估值
///
/// 成本值、售價值先加總再捨入到 2 位；毛利由捨入後的值相減，
/// 保證 `margin == sell_value - cost_value`。
pub fn value_by_warehouse(stock: &[EnrichedStock]) -> Vec<WarehouseValuation> {
    let mut buckets: BTreeMap<i64, (&str, Decimal, Decimal)> = BTreeMap::new();

    for row in stock {
        let bucket = buckets
            .entry(row.warehouse_id)
            .or_insert((row.warehouse_name.as_str(), Decimal::ZERO, Decimal::ZERO));
        bucket.1 += row.quantity * row.cost_price;
        bucket.2 += row.quantity * row.net_sell_price;
    }

    let mut valuations: Vec<WarehouseValuation> = buckets
        .into_iter()
        .map(|(warehouse_id, (name, cost, sell))| {
            let cost_value = round_money(cost);
            let sell_value = round_money(sell);
            WarehouseValuation {
                warehouse_id,
                warehouse_name: name.to_string(),
                cost_value,
                sell_value,
                margin: sell_value - cost_value,
            }
        })
        .collect();

    valuations.sort_by(|a, b| {
        a.warehouse_name
            .cmp(&b.warehouse_name)
            .then(a.warehouse_id.cmp(&b.warehouse_id))
    });
    valuations
}

/// 合計各倉庫估值
pub fn total_valuation(valuations: &[WarehouseValuation]) -> ValuationTotals {
    valuations
        .iter()
        .fold(ValuationTotals::default(), |mut totals, v| {
            totals.cost_value += v.cost_value;
            totals.sell_value += v.sell_value;
            totals.margin += v.margin;
            totals
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn stock_row(warehouse_id: i64, name: &str, qty: i64, cost: &str, net_sell: &str) -> EnrichedStock {
        EnrichedStock {
            product_id: 1,
            sku: "P-001".to_string(),
            product_name: "Martillo".to_string(),
            warehouse_id,
            warehouse_name: name.to_string(),
            quantity: Decimal::from(qty),
            cost_price: Decimal::from_str(cost).unwrap(),
            net_sell_price: Decimal::from_str(net_sell).unwrap(),
        }
    }

    #[test]
    fn test_valuation_example() {
        // 庫存 100，成本 10，售價 20 折扣 10% => 淨售價 18
        let valuations = value_by_warehouse(&[stock_row(1, "Central", 100, "10", "18")]);

        assert_eq!(valuations.len(), 1);
        assert_eq!(valuations[0].cost_value, Decimal::from(1000));
        assert_eq!(valuations[0].sell_value, Decimal::from(1800));
        assert_eq!(valuations[0].margin, Decimal::from(800));
    }

    #[test]
    fn test_valuation_groups_by_warehouse() {
        let valuations = value_by_warehouse(&[
            stock_row(2, "Norte", 3, "1.005", "2"),
            stock_row(1, "Central", 1, "5", "7"),
            stock_row(2, "Norte", 1, "1", "1"),
        ]);

        assert_eq!(valuations.len(), 2);
        assert_eq!(valuations[0].warehouse_name, "Central");
        // 3 × 1.005 + 1 = 4.015 => 4.02
        assert_eq!(valuations[1].cost_value, Decimal::from_str("4.02").unwrap());
        assert_eq!(valuations[1].sell_value, Decimal::from(7));

        let totals = total_valuation(&valuations);
        assert_eq!(totals.cost_value, Decimal::from_str("9.02").unwrap());
        assert_eq!(totals.margin, totals.sell_value - totals.cost_value);
    }

    #[test]
    fn test_negative_stock_tolerated() {
        let valuations = value_by_warehouse(&[stock_row(1, "Central", -2, "10", "15")]);
        assert_eq!(valuations[0].cost_value, Decimal::from(-20));
        assert_eq!(valuations[0].margin, Decimal::from(-10));
    }

    proptest! {
        #[test]
        fn margin_is_sell_minus_cost(
            rows in prop::collection::vec((1i64..4, -50i64..500, 0i64..100_000, 0i64..100_000), 0..20)
        ) {
            let stock: Vec<EnrichedStock> = rows
                .iter()
                .map(|(wh, qty, cost, sell)| EnrichedStock {
                    product_id: 1,
                    sku: String::new(),
                    product_name: String::new(),
                    warehouse_id: *wh,
                    warehouse_name: format!("W{}", wh),
                    quantity: Decimal::from(*qty),
                    cost_price: Decimal::new(*cost, 3),
                    net_sell_price: Decimal::new(*sell, 3),
                })
                .collect();

            for v in value_by_warehouse(&stock) {
                prop_assert_eq!(v.margin, v.sell_value - v.cost_value);
            }
        }
    }
}
