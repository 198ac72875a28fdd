//! # Kardex
//!
//! 庫存/銷售分析聚合引擎
//!
//! - `kardex-core`：資料模型、時間窗口、配置與錯誤
//! - `kardex-calc`：Kardex 合併、各項指標與儀表板組裝

pub use kardex_calc::{
    activity, critical, dead_stock, enrichment, ledger, rotation, rounding, source, summary,
    valuation, DashboardCalculator, DashboardFilter, DimensionLookup, EnrichedStock, FactQuery,
    FactSet, FactSource, InMemoryFactSource, InventoryDashboard, KardexBuilder, LedgerEntry,
    LedgerSource, SalesDashboard,
};
pub use kardex_core::{
    AnalyticsConfig, AnalyticsError, InventoryRecord, MovementRecord, Product, Result,
    SaleLineRecord, SaleRecord, SaleStatus, TimeWindow, Warehouse,
};
