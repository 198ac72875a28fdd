//! 儀表板主計算器

use chrono::NaiveDate;
use kardex_core::{AnalyticsConfig, TimeWindow};
use rust_decimal::Decimal;

use crate::activity::ProductActivity;
use crate::critical::{critical_stock, CriticalStockRow};
use crate::dead_stock::{dead_stock, DeadStockRow};
use crate::enrichment::{enrich_stock, stock_by_product, DimensionLookup, EnrichedStock};
use crate::ledger::KardexBuilder;
use crate::rotation::{coverage_days, rotation_index, CoverageRow, RotationRow};
use crate::source::{DashboardFilter, FactQuery, FactSet, FactSource, WindowedFacts};
use crate::summary::{summarize_movements, MovementSummary};
use crate::valuation::{total_valuation, value_by_warehouse, ValuationTotals, WarehouseValuation};
use crate::{InventoryDashboard, SalesDashboard};

/// 儀表板計算器
///
/// 每次請求一次性取回資料，之後的計算是純函數，不保留任何狀態。
pub struct DashboardCalculator<S> {
    /// 引擎配置
    config: AnalyticsConfig,

    /// 事實資料來源
    source: S,
}

/// 快照類指標（與 Kardex 合併平行計算）
struct InventoryMetrics {
    critical_stock: Vec<CriticalStockRow>,
    valuation: Vec<WarehouseValuation>,
    valuation_totals: ValuationTotals,
    movement_summary: Vec<MovementSummary>,
    rotation: Vec<RotationRow>,
    coverage: Vec<CoverageRow>,
    dead_stock: Vec<DeadStockRow>,
}

impl<S: FactSource> DashboardCalculator<S> {
    /// 創建新的儀表板計算器
    pub fn new(config: AnalyticsConfig, source: S) -> Self {
        Self { config, source }
    }

    /// 獲取配置引用
    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// 解析查詢的時間窗口
    pub fn resolve_window(&self, filter: &DashboardFilter, today: NaiveDate) -> TimeWindow {
        TimeWindow::resolve(filter.from, filter.to, today, self.config.default_window_days)
    }

    /// 庫存儀表板
    pub fn inventory_dashboard(
        &self,
        filter: &DashboardFilter,
        today: NaiveDate,
    ) -> kardex_core::Result<InventoryDashboard> {
        let window = self.resolve_window(filter, today);
        let facts = self.fetch(&FactQuery::new(window, filter))?;
        Ok(self.compute_inventory(&facts, window))
    }

    /// 銷售儀表板（重點產品清單不適用）
    pub fn sales_dashboard(
        &self,
        filter: &DashboardFilter,
        today: NaiveDate,
    ) -> kardex_core::Result<SalesDashboard> {
        let filter = DashboardFilter {
            key_product_ids: None,
            ..filter.clone()
        };
        let window = self.resolve_window(&filter, today);
        let facts = self.fetch(&FactQuery::new(window, &filter))?;
        Ok(self.compute_sales(&facts, window))
    }

    fn fetch(&self, query: &FactQuery) -> kardex_core::Result<FactSet> {
        self.source.fetch(query).map_err(|e| {
            tracing::warn!("資料來源取回失敗：{}", e);
            e
        })
    }

    /// 以已取回的資料計算庫存儀表板
    pub fn compute_inventory(&self, facts: &FactSet, window: TimeWindow) -> InventoryDashboard {
        tracing::info!(
            "開始庫存儀表板計算：{} ~ {}，庫存 {} 筆，異動 {} 筆，銷售 {} 筆",
            window.from,
            window.to,
            facts.inventory.len(),
            facts.movements.len(),
            facts.sales.len()
        );
        let start_time = std::time::Instant::now();

        // Step 1: 維度補全
        tracing::debug!("Step 1: 維度補全");
        let lookup = DimensionLookup::new(&facts.products, &facts.warehouses);
        let stock = enrich_stock(&facts.inventory, &lookup);

        // Step 2: 時間窗口過濾
        tracing::debug!("Step 2: 時間窗口過濾");
        let windowed = facts.windowed(&window);

        // Step 3: Kardex 合併與指標計算互不依賴，平行執行
        tracing::debug!("Step 3: Kardex 合併與指標計算");
        let config = &self.config;
        let builder = KardexBuilder::new(config.synthetic_id_offset);
        let (ledger, metrics) = rayon::join(
            || builder.build(&windowed, &lookup),
            || inventory_metrics(config, &stock, &windowed, &lookup, window),
        );

        tracing::info!("庫存儀表板計算完成，耗時 {:?}", start_time.elapsed());
        tracing::info!(
            "Kardex {} 筆，臨界庫存 {} 筆，呆滯品 {} 筆",
            ledger.len(),
            metrics.critical_stock.len(),
            metrics.dead_stock.len()
        );

        InventoryDashboard {
            window,
            stock,
            critical_stock: metrics.critical_stock,
            valuation: metrics.valuation,
            valuation_totals: metrics.valuation_totals,
            ledger,
            movement_summary: metrics.movement_summary,
            rotation: metrics.rotation,
            coverage: metrics.coverage,
            dead_stock: metrics.dead_stock,
        }
    }

    /// 以已取回的資料計算銷售儀表板
    pub fn compute_sales(&self, facts: &FactSet, window: TimeWindow) -> SalesDashboard {
        tracing::info!(
            "開始銷售儀表板計算：{} ~ {}，銷售 {} 筆，明細 {} 筆",
            window.from,
            window.to,
            facts.sales.len(),
            facts.sale_lines.len()
        );
        let start_time = std::time::Instant::now();

        tracing::debug!("Step 1: 維度補全");
        let lookup = DimensionLookup::new(&facts.products, &facts.warehouses);
        let stock = stock_by_product(&enrich_stock(&facts.inventory, &lookup));

        tracing::debug!("Step 2: 時間窗口過濾");
        let windowed = facts.windowed(&window);
        let activity = ProductActivity::collect(&windowed);

        tracing::debug!("Step 3: 指標計算");
        let units_sold = windowed
            .sale_lines()
            .map(|(_, line)| line.quantity)
            .sum::<Decimal>();

        let dashboard = SalesDashboard {
            window,
            sales_count: windowed.sales.len(),
            units_sold,
            top_rotation: rotation_index(&stock, &activity, &lookup, self.config.sales_rotation_cap),
            coverage: coverage_days(
                &stock,
                &activity,
                &lookup,
                window.window_length_days,
                self.config.coverage_cap,
            ),
            products_without_movement: dead_stock(
                &lookup,
                &activity,
                &stock,
                self.config.sales_dead_stock_cap,
            ),
            movement_summary: summarize_movements(&windowed),
        };

        tracing::info!("銷售儀表板計算完成，耗時 {:?}", start_time.elapsed());

        dashboard
    }
}

fn inventory_metrics(
    config: &AnalyticsConfig,
    stock: &[EnrichedStock],
    windowed: &WindowedFacts<'_>,
    lookup: &DimensionLookup,
    window: TimeWindow,
) -> InventoryMetrics {
    let activity = ProductActivity::collect(windowed);
    let stock_totals = stock_by_product(stock);
    let valuation = value_by_warehouse(stock);
    let valuation_totals = total_valuation(&valuation);

    InventoryMetrics {
        critical_stock: critical_stock(stock, Decimal::from(config.critical_stock_threshold)),
        valuation,
        valuation_totals,
        movement_summary: summarize_movements(windowed),
        rotation: rotation_index(&stock_totals, &activity, lookup, config.inventory_rotation_cap),
        coverage: coverage_days(
            &stock_totals,
            &activity,
            lookup,
            window.window_length_days,
            config.coverage_cap,
        ),
        dead_stock: dead_stock(lookup, &activity, &stock_totals, config.inventory_dead_stock_cap),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::InMemoryFactSource;
    use kardex_core::{
        AnalyticsError, InventoryRecord, MovementRecord, Product, SaleLineRecord, SaleRecord,
        Warehouse,
    };

    struct FailingSource;

    impl FactSource for FailingSource {
        fn fetch(&self, _query: &FactQuery) -> kardex_core::Result<FactSet> {
            Err(AnalyticsError::Source("connection refused".to_string()))
        }
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn facts() -> FactSet {
        FactSet {
            inventory: vec![
                InventoryRecord::new(1, 1, Decimal::from(100)),
                InventoryRecord::new(2, 1, Decimal::from(2)),
            ],
            movements: vec![MovementRecord::new(
                500,
                date(2).and_hms_opt(9, 0, 0).unwrap(),
                1,
                1,
                "Entrada",
                Decimal::from(10),
            )],
            sales: vec![SaleRecord::new(1, date(5).and_hms_opt(9, 0, 0).unwrap())],
            sale_lines: vec![SaleLineRecord::new(1, Some(1), 1, Decimal::from(3))],
            products: vec![
                Product::new(1, "P-001", "Martillo").with_prices(Decimal::from(10), Decimal::from(20)),
                Product::new(2, "P-002", "Alicate"),
                Product::new(3, "P-003", "Serrucho"),
            ],
            warehouses: vec![Warehouse::new(1, "Central")],
        }
    }

    #[test]
    fn test_inventory_dashboard_end_to_end() {
        let calculator =
            DashboardCalculator::new(AnalyticsConfig::default(), InMemoryFactSource::new(facts()));

        let dashboard = calculator
            .inventory_dashboard(&DashboardFilter::new(), date(30))
            .unwrap();

        assert_eq!(dashboard.window.from, date(1));
        assert_eq!(dashboard.stock.len(), 2);
        assert_eq!(dashboard.ledger.len(), 2);
        assert_eq!(dashboard.critical_stock.len(), 1);
        assert_eq!(dashboard.critical_stock[0].product_name, "Alicate");
        assert_eq!(dashboard.valuation_totals.cost_value, Decimal::from(1000));

        let dead: Vec<i64> = dashboard.dead_stock.iter().map(|r| r.product_id).collect();
        assert_eq!(dead, vec![2, 3]);
    }

    #[test]
    fn test_sales_dashboard() {
        let calculator =
            DashboardCalculator::new(AnalyticsConfig::default(), InMemoryFactSource::new(facts()));

        let dashboard = calculator
            .sales_dashboard(
                &DashboardFilter::new().with_key_product_ids(vec![2]),
                date(30),
            )
            .unwrap();

        // 重點產品清單在銷售儀表板中不適用
        assert_eq!(dashboard.sales_count, 1);
        assert_eq!(dashboard.units_sold, Decimal::from(3));
        let rotated: Vec<i64> = dashboard.top_rotation.iter().map(|r| r.product_id).collect();
        assert_eq!(rotated, vec![1, 2]);
        assert_eq!(dashboard.products_without_movement.len(), 2);
    }

    #[test]
    fn test_source_failure_propagates() {
        let calculator = DashboardCalculator::new(AnalyticsConfig::default(), FailingSource);

        let result = calculator.inventory_dashboard(&DashboardFilter::new(), date(30));

        assert!(matches!(result, Err(AnalyticsError::Source(_))));
    }

    #[test]
    fn test_inverted_window_yields_empty_activity() {
        let calculator =
            DashboardCalculator::new(AnalyticsConfig::default(), InMemoryFactSource::new(facts()));
        let filter = DashboardFilter::new().with_dates(Some(date(20)), Some(date(1)));

        let inventory = calculator.inventory_dashboard(&filter, date(30)).unwrap();
        let sales = calculator.sales_dashboard(&filter, date(30)).unwrap();

        // 庫存快照不受窗口影響；窗口內的活動全部為空
        assert_eq!(inventory.stock.len(), 2);
        assert!(inventory.ledger.is_empty());
        assert!(inventory.movement_summary.is_empty());
        assert!(inventory.rotation.iter().all(|r| r.sold_qty.is_zero()));
        assert_eq!(sales.sales_count, 0);
        assert_eq!(sales.units_sold, Decimal::ZERO);
        assert!(sales.movement_summary.is_empty());
    }

    #[test]
    fn test_future_from_date_yields_empty_activity() {
        let calculator =
            DashboardCalculator::new(AnalyticsConfig::default(), InMemoryFactSource::new(facts()));
        let filter = DashboardFilter::new().with_dates(Some(date(25)), None);

        let dashboard = calculator.inventory_dashboard(&filter, date(10)).unwrap();

        assert!(dashboard.ledger.is_empty());
        assert_eq!(dashboard.window.window_length_days, 1);
    }

    #[test]
    fn test_repeated_runs_identical() {
        let calculator =
            DashboardCalculator::new(AnalyticsConfig::default(), InMemoryFactSource::new(facts()));
        let filter = DashboardFilter::new();

        let first = calculator.inventory_dashboard(&filter, date(30)).unwrap();
        let second = calculator.inventory_dashboard(&filter, date(30)).unwrap();

        assert_eq!(first, second);
    }
}
