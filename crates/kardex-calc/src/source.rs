//! 事實資料來源
//!
//! 持久層是外部協作者：它依查詢條件一次性取回原始資料列，
//! 之後的計算完全在記憶體中進行。

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use kardex_core::{
    InventoryRecord, MovementRecord, Product, SaleLineRecord, SaleRecord, TimeWindow, Warehouse,
};
use serde::{Deserialize, Serialize};

/// 儀表板查詢參數（對應 HTTP 查詢字串）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardFilter {
    /// 起始日期
    #[serde(rename = "fechaDesde", default)]
    pub from: Option<NaiveDate>,

    /// 結束日期
    #[serde(rename = "fechaHasta", default)]
    pub to: Option<NaiveDate>,

    /// 倉庫
    #[serde(rename = "bodegaId", default)]
    pub warehouse_id: Option<i64>,

    /// 產品
    #[serde(rename = "productoId", default)]
    pub product_id: Option<i64>,

    /// 重點產品清單（僅庫存儀表板）
    #[serde(rename = "productosClaveIds", default)]
    pub key_product_ids: Option<Vec<i64>>,
}

impl DashboardFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置日期區間
    pub fn with_dates(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    /// 建構器模式：設置倉庫
    pub fn with_warehouse_id(mut self, warehouse_id: i64) -> Self {
        self.warehouse_id = Some(warehouse_id);
        self
    }

    /// 建構器模式：設置產品
    pub fn with_product_id(mut self, product_id: i64) -> Self {
        self.product_id = Some(product_id);
        self
    }

    /// 建構器模式：設置重點產品清單
    pub fn with_key_product_ids(mut self, ids: Vec<i64>) -> Self {
        self.key_product_ids = Some(ids);
        self
    }
}

/// 已解析的查詢（時間窗口 + 實體過濾）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactQuery {
    pub window: TimeWindow,
    pub warehouse_id: Option<i64>,
    pub product_id: Option<i64>,
    pub key_product_ids: Option<Vec<i64>>,
}

impl FactQuery {
    pub fn new(window: TimeWindow, filter: &DashboardFilter) -> Self {
        Self {
            window,
            warehouse_id: filter.warehouse_id,
            product_id: filter.product_id,
            key_product_ids: filter.key_product_ids.clone(),
        }
    }

    /// 是否有任何實體過濾條件
    pub fn has_entity_filter(&self) -> bool {
        self.warehouse_id.is_some() || self.product_id.is_some() || self.key_product_ids.is_some()
    }

    pub fn matches_product(&self, product_id: i64) -> bool {
        self.product_id.map_or(true, |id| id == product_id)
            && self
                .key_product_ids
                .as_ref()
                .map_or(true, |ids| ids.contains(&product_id))
    }

    /// 無產品ID的資料列只在沒有產品過濾時保留
    pub fn matches_optional_product(&self, product_id: Option<i64>) -> bool {
        match product_id {
            Some(id) => self.matches_product(id),
            None => self.product_id.is_none() && self.key_product_ids.is_none(),
        }
    }

    pub fn matches_warehouse(&self, warehouse_id: i64) -> bool {
        self.warehouse_id.map_or(true, |id| id == warehouse_id)
    }
}

/// 一次計算所需的全部原始資料
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactSet {
    pub inventory: Vec<InventoryRecord>,
    pub movements: Vec<MovementRecord>,
    pub sales: Vec<SaleRecord>,
    pub sale_lines: Vec<SaleLineRecord>,
    pub products: Vec<Product>,
    pub warehouses: Vec<Warehouse>,
}

impl FactSet {
    /// 套用時間窗口：保留窗口內的異動與未作廢的銷售（含其明細）
    ///
    /// 銷售與明細保持原始列舉順序。
    pub fn windowed(&self, window: &TimeWindow) -> WindowedFacts<'_> {
        let movements = self
            .movements
            .iter()
            .filter(|m| window.contains(m.timestamp))
            .collect();

        let mut lines_by_sale: HashMap<i64, Vec<&SaleLineRecord>> = HashMap::new();
        for line in &self.sale_lines {
            lines_by_sale.entry(line.sale_id).or_default().push(line);
        }

        let sales = self
            .sales
            .iter()
            .filter(|s| !s.is_voided() && window.contains(s.date))
            .map(|sale| QualifyingSale {
                sale,
                lines: lines_by_sale.get(&sale.id).cloned().unwrap_or_default(),
            })
            .collect();

        WindowedFacts { movements, sales }
    }
}

/// 窗口內的銷售及其明細
#[derive(Debug, Clone)]
pub struct QualifyingSale<'a> {
    pub sale: &'a SaleRecord,
    pub lines: Vec<&'a SaleLineRecord>,
}

/// 已套用時間窗口的事實資料
#[derive(Debug, Clone, Default)]
pub struct WindowedFacts<'a> {
    pub movements: Vec<&'a MovementRecord>,
    pub sales: Vec<QualifyingSale<'a>>,
}

impl<'a> WindowedFacts<'a> {
    /// 所有合格的銷售明細（含無產品ID者）
    pub fn sale_lines(&self) -> impl Iterator<Item = (&'a SaleRecord, &'a SaleLineRecord)> + '_ {
        self.sales
            .iter()
            .flat_map(|qs| qs.lines.iter().map(move |line| (qs.sale, *line)))
    }
}

/// 事實資料來源（持久層接縫）
///
/// 取回失敗時原樣回傳錯誤；本核心不重試、不快取。
pub trait FactSource {
    fn fetch(&self, query: &FactQuery) -> kardex_core::Result<FactSet>;
}

impl<T: FactSource + ?Sized> FactSource for &T {
    fn fetch(&self, query: &FactQuery) -> kardex_core::Result<FactSet> {
        (**self).fetch(query)
    }
}

/// 記憶體內的資料來源，依查詢條件過濾
#[derive(Debug, Clone, Default)]
pub struct InMemoryFactSource {
    facts: FactSet,
}

impl InMemoryFactSource {
    pub fn new(facts: FactSet) -> Self {
        Self { facts }
    }
}

impl FactSource for InMemoryFactSource {
    fn fetch(&self, query: &FactQuery) -> kardex_core::Result<FactSet> {
        let window = &query.window;

        let inventory: Vec<InventoryRecord> = self
            .facts
            .inventory
            .iter()
            .filter(|r| query.matches_product(r.product_id) && query.matches_warehouse(r.warehouse_id))
            .cloned()
            .collect();

        let movements: Vec<MovementRecord> = self
            .facts
            .movements
            .iter()
            .filter(|m| {
                window.contains(m.timestamp)
                    && query.matches_product(m.product_id)
                    && query.matches_warehouse(m.warehouse_id)
            })
            .cloned()
            .collect();

        let candidate_sales: HashSet<i64> = self
            .facts
            .sales
            .iter()
            .filter(|s| !s.is_voided() && window.contains(s.date))
            .map(|s| s.id)
            .collect();

        let sale_lines: Vec<SaleLineRecord> = self
            .facts
            .sale_lines
            .iter()
            .filter(|l| {
                candidate_sales.contains(&l.sale_id)
                    && query.matches_optional_product(l.product_id)
                    && query.matches_warehouse(l.warehouse_id)
            })
            .cloned()
            .collect();

        // 有實體過濾時，只保留仍有明細的銷售
        let sales_with_lines: HashSet<i64> = sale_lines.iter().map(|l| l.sale_id).collect();
        let sales: Vec<SaleRecord> = self
            .facts
            .sales
            .iter()
            .filter(|s| {
                candidate_sales.contains(&s.id)
                    && (!query.has_entity_filter() || sales_with_lines.contains(&s.id))
            })
            .cloned()
            .collect();

        // 維度只載入被引用的ID，外加呆滯品偵測所需的啟用產品
        let referenced_products: HashSet<i64> = inventory
            .iter()
            .map(|r| r.product_id)
            .chain(movements.iter().map(|m| m.product_id))
            .chain(sale_lines.iter().filter_map(|l| l.product_id))
            .collect();
        let products = self
            .facts
            .products
            .iter()
            .filter(|p| {
                referenced_products.contains(&p.id) || (p.active && query.matches_product(p.id))
            })
            .cloned()
            .collect();

        let referenced_warehouses: HashSet<i64> = inventory
            .iter()
            .map(|r| r.warehouse_id)
            .chain(movements.iter().map(|m| m.warehouse_id))
            .chain(sale_lines.iter().map(|l| l.warehouse_id))
            .collect();
        let warehouses = self
            .facts
            .warehouses
            .iter()
            .filter(|w| referenced_warehouses.contains(&w.id))
            .cloned()
            .collect();

        tracing::debug!(
            "資料來源取回：庫存 {} 筆，異動 {} 筆，銷售 {} 筆，明細 {} 筆",
            inventory.len(),
            movements.len(),
            sales.len(),
            sale_lines.len()
        );

        Ok(FactSet {
            inventory,
            movements,
            sales,
            sale_lines,
            products,
            warehouses,
        })
    }
}
