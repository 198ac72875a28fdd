//! 庫存儀表板範例
//!
//! 展示從原始資料到庫存/銷售儀表板的完整流程

use anyhow::Context;
use chrono::{Days, Local};
use kardex::{
    AnalyticsConfig, DashboardCalculator, DashboardFilter, FactSet, InMemoryFactSource,
    InventoryRecord, MovementRecord, Product, SaleLineRecord, SaleRecord, Warehouse,
};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("===== Kardex Dashboard Example =====\n");

    // 步驟 1: 載入配置
    println!("[1] Load Configuration");
    let config = AnalyticsConfig::from_json_str(r#"{ "critical_stock_threshold": 5 }"#)
        .context("配置解析失敗")?;
    println!(
        "    Critical threshold: {}, default window: {} days\n",
        config.critical_stock_threshold, config.default_window_days
    );

    // 步驟 2: 準備原始資料
    println!("[2] Prepare Facts");
    let today = Local::now().date_naive();
    let facts = sample_facts(today)?;
    tracing::info!("範例資料基準日：{}", today);
    println!(
        "    Inventory: {}, Movements: {}, Sales: {}\n",
        facts.inventory.len(),
        facts.movements.len(),
        facts.sales.len()
    );

    let calculator = DashboardCalculator::new(config, InMemoryFactSource::new(facts));

    // 步驟 3: 庫存儀表板（預設窗口）
    println!("[3] Inventory Dashboard");
    let inventory = calculator.inventory_dashboard(&DashboardFilter::new(), today)?;
    println!(
        "    Window: {} ~ {} ({} days)",
        inventory.window.from, inventory.window.to, inventory.window.window_length_days
    );
    for row in &inventory.critical_stock {
        tracing::warn!("臨界庫存：{} ({}) 剩餘 {}", row.product_name, row.sku, row.quantity);
    }
    for entry in &inventory.ledger {
        println!(
            "    {} #{} {} {} x{}",
            entry.timestamp, entry.id, entry.movement_type, entry.product_name, entry.quantity
        );
    }
    println!();

    // 步驟 4: 銷售儀表板（單一倉庫）
    println!("[4] Sales Dashboard (warehouse 1)");
    let sales = calculator.sales_dashboard(&DashboardFilter::new().with_warehouse_id(1), today)?;
    println!("{}", serde_json::to_string_pretty(&sales)?);

    Ok(())
}

fn sample_facts(today: chrono::NaiveDate) -> anyhow::Result<FactSet> {
    let days_ago = |n: u64, hour: u32| {
        today
            .checked_sub_days(Days::new(n))
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .context("日期計算溢出")
    };

    Ok(FactSet {
        inventory: vec![
            InventoryRecord::new(1, 1, Decimal::from(100)),
            InventoryRecord::new(2, 1, Decimal::from(3)),
            InventoryRecord::new(3, 2, Decimal::from(40)),
        ],
        movements: vec![
            MovementRecord::new(500, days_ago(20, 9)?, 1, 1, "Entrada", Decimal::from(10))
                .with_reason("Compra")
                .with_user_id(7),
            MovementRecord::new(501, days_ago(10, 15)?, 2, 1, "Ajuste", Decimal::from(-1))
                .with_reason("Merma"),
        ],
        sales: vec![
            SaleRecord::new(1, days_ago(15, 11)?),
            SaleRecord::new(2, days_ago(5, 17)?),
            SaleRecord::new(3, days_ago(3, 10)?).voided(),
        ],
        sale_lines: vec![
            SaleLineRecord::new(1, Some(1), 1, Decimal::from(12)),
            SaleLineRecord::new(2, Some(1), 1, Decimal::from(8)),
            SaleLineRecord::new(2, None, 1, Decimal::from(1)),
            SaleLineRecord::new(3, Some(3), 2, Decimal::from(30)),
        ],
        products: vec![
            Product::new(1, "P-001", "Martillo")
                .with_prices(Decimal::from(10), Decimal::from(20))
                .with_discount_pct(Decimal::from(10)),
            Product::new(2, "P-002", "Alicate").with_prices(Decimal::from(6), Decimal::from(9)),
            Product::new(3, "P-003", "Serrucho").with_prices(Decimal::from(15), Decimal::from(25)),
            Product::new(4, "P-004", "Lima"),
        ],
        warehouses: vec![Warehouse::new(1, "Central"), Warehouse::new(2, "Norte")],
    })
}
