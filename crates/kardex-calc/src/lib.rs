//! # Kardex Calculation Engine
//!
//! 庫存/銷售分析聚合引擎：把原始庫存、異動與銷售資料轉為儀表板讀取模型

pub mod activity;
pub mod critical;
pub mod dashboard;
pub mod dead_stock;
pub mod enrichment;
pub mod ledger;
pub mod rotation;
pub mod rounding;
pub mod source;
pub mod summary;
pub mod valuation;

use kardex_core::TimeWindow;
use rust_decimal::Decimal;
use serde::Serialize;

// Re-export 主要類型
pub use dashboard::DashboardCalculator;
pub use enrichment::{DimensionLookup, EnrichedStock};
pub use ledger::{KardexBuilder, LedgerEntry, LedgerSource};
pub use source::{DashboardFilter, FactQuery, FactSet, FactSource, InMemoryFactSource};

/// 庫存儀表板
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryDashboard {
    /// 已解析的時間窗口
    pub window: TimeWindow,

    /// 庫存快照（不含停用產品）
    pub stock: Vec<EnrichedStock>,

    /// 臨界庫存
    pub critical_stock: Vec<critical::CriticalStockRow>,

    /// 各倉庫估值
    pub valuation: Vec<valuation::WarehouseValuation>,

    /// 估值合計
    pub valuation_totals: valuation::ValuationTotals,

    /// Kardex（實際異動 + 銷售推導出庫）
    pub ledger: Vec<LedgerEntry>,

    /// 異動類型彙總
    pub movement_summary: Vec<summary::MovementSummary>,

    /// 週轉率排行
    pub rotation: Vec<rotation::RotationRow>,

    /// 覆蓋天數
    pub coverage: Vec<rotation::CoverageRow>,

    /// 呆滯品
    pub dead_stock: Vec<dead_stock::DeadStockRow>,
}

/// 銷售儀表板
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesDashboard {
    /// 已解析的時間窗口
    pub window: TimeWindow,

    /// 窗口內未作廢的銷售筆數
    pub sales_count: usize,

    /// 售出總量（含無產品ID的明細）
    pub units_sold: Decimal,

    /// 週轉率排行
    pub top_rotation: Vec<rotation::RotationRow>,

    /// 覆蓋天數
    pub coverage: Vec<rotation::CoverageRow>,

    /// 無異動產品
    pub products_without_movement: Vec<dead_stock::DeadStockRow>,

    /// 異動類型彙總
    pub movement_summary: Vec<summary::MovementSummary>,
}
