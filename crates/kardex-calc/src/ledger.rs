//! Kardex 合併
//!
//! 將實際庫存異動與銷售明細推導出的虛擬出庫合併為單一帳冊，
//! 依 `(timestamp, id)` 排序。銷售推導的分錄使用合成ID，
//! 由遠高於實際ID範圍的起點遞增配發，以構造方式保證不衝突。

use chrono::NaiveDateTime;
use kardex_core::{MovementRecord, SaleLineRecord, SaleRecord};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::enrichment::DimensionLookup;
use crate::source::WindowedFacts;

/// 銷售推導分錄的異動類型
pub const SALE_MOVEMENT_TYPE: &str = "Salida (Venta)";

/// 銷售推導分錄的原因
pub const SALE_REASON: &str = "Venta";

/// 銷售推導分錄的參考標籤
pub const SALE_REFERENCE_TYPE: &str = "VENTA";

/// 分錄來源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LedgerSource {
    /// 實際庫存異動
    Movement,
    /// 銷售明細
    Sale { sale_id: i64 },
}

/// Kardex 分錄
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerEntry {
    pub id: i64,
    pub timestamp: NaiveDateTime,
    pub movement_type: String,
    pub product_id: i64,
    pub sku: String,
    pub product_name: String,
    pub warehouse_id: i64,
    pub warehouse_name: String,
    pub quantity: Decimal,
    pub reason: Option<String>,
    pub reference_type: Option<String>,
    pub user_id: Option<i64>,
    pub source: LedgerSource,
}

impl LedgerEntry {
    /// 檢查是否為合成分錄
    pub fn is_synthetic(&self) -> bool {
        matches!(self.source, LedgerSource::Sale { .. })
    }

    fn from_movement(movement: &MovementRecord, lookup: &DimensionLookup) -> Self {
        let product = lookup.product(movement.product_id);
        Self {
            id: movement.id,
            timestamp: movement.timestamp,
            movement_type: movement.movement_type.clone(),
            product_id: movement.product_id,
            sku: product.sku,
            product_name: product.name,
            warehouse_id: movement.warehouse_id,
            warehouse_name: lookup.warehouse_name(movement.warehouse_id),
            quantity: movement.quantity,
            reason: movement.reason.clone(),
            reference_type: movement.reference_type.clone(),
            user_id: movement.user_id,
            source: LedgerSource::Movement,
        }
    }

    fn from_sale_line(
        id: i64,
        sale: &SaleRecord,
        line: &SaleLineRecord,
        product_id: i64,
        lookup: &DimensionLookup,
    ) -> Self {
        let product = lookup.product(product_id);
        Self {
            id,
            timestamp: sale.date,
            movement_type: SALE_MOVEMENT_TYPE.to_string(),
            product_id,
            sku: product.sku,
            product_name: product.name,
            warehouse_id: line.warehouse_id,
            warehouse_name: lookup.warehouse_name(line.warehouse_id),
            quantity: line.quantity,
            reason: Some(SALE_REASON.to_string()),
            reference_type: Some(SALE_REFERENCE_TYPE.to_string()),
            user_id: None,
            source: LedgerSource::Sale { sale_id: sale.id },
        }
    }
}

/// 合成ID配發器
#[derive(Debug, Clone)]
pub struct SyntheticIdAllocator {
    next: i64,
}

impl SyntheticIdAllocator {
    pub fn new(offset: i64) -> Self {
        Self { next: offset }
    }

    /// 配發下一個ID
    pub fn next_id(&mut self) -> i64 {
        let id = self.next;
        self.next = self.next.saturating_add(1);
        id
    }
}

/// Kardex 建構器
#[derive(Debug, Clone, Copy)]
pub struct KardexBuilder {
    synthetic_id_offset: i64,
}

impl KardexBuilder {
    pub fn new(synthetic_id_offset: i64) -> Self {
        Self {
            synthetic_id_offset,
        }
    }

    /// 未排序的分錄序列：先實際異動，後銷售明細（依銷售/明細列舉順序配發ID）
    ///
    /// 無產品ID的明細不進入帳冊。
    pub fn entries<'s>(
        &self,
        facts: &'s WindowedFacts<'s>,
        lookup: &'s DimensionLookup,
    ) -> impl Iterator<Item = LedgerEntry> + 's {
        let mut ids = SyntheticIdAllocator::new(self.synthetic_id_offset);

        let movement_entries = facts
            .movements
            .iter()
            .map(move |m| LedgerEntry::from_movement(m, lookup));

        let sale_entries = facts
            .sale_lines()
            .filter_map(|(sale, line)| match line.product_id {
                Some(product_id) => Some((sale, line, product_id)),
                None => {
                    tracing::debug!("銷售 {} 的明細沒有產品ID，不列入 Kardex", sale.id);
                    None
                }
            })
            .map(move |(sale, line, product_id)| {
                LedgerEntry::from_sale_line(ids.next_id(), sale, line, product_id, lookup)
            });

        movement_entries.chain(sale_entries)
    }

    /// 建立排序後的 Kardex
    pub fn build(&self, facts: &WindowedFacts<'_>, lookup: &DimensionLookup) -> Vec<LedgerEntry> {
        let mut ledger: Vec<LedgerEntry> = self.entries(facts, lookup).collect();
        ledger.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then(a.id.cmp(&b.id)));

        tracing::debug!(
            "Kardex 分錄 {} 筆（合成 {} 筆）",
            ledger.len(),
            ledger.iter().filter(|e| e.is_synthetic()).count()
        );

        ledger
    }
}

/// 單一產品的 Kardex（保持原排序）
pub fn entries_for_product(ledger: &[LedgerEntry], product_id: i64) -> Vec<&LedgerEntry> {
    ledger.iter().filter(|e| e.product_id == product_id).collect()
}
