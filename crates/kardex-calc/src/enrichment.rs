//! 維度補全
//!
//! 以預先載入的產品/倉庫字典補全事實資料列。查詢是全函數：
//! 找不到的維度會以佔位值替代，下游計算器不需處理缺漏。

use std::collections::{BTreeMap, HashMap};

use kardex_core::{InventoryRecord, Product, Warehouse};
use rust_decimal::Decimal;
use serde::Serialize;

/// 找不到產品時的名稱
pub const MISSING_PRODUCT_NAME: &str = "(Producto)";

/// 產品展示維度（保證存在）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDisplay {
    pub id: i64,
    pub sku: String,
    pub name: String,
    pub cost_price: Decimal,
    pub net_sell_price: Decimal,
    pub active: bool,
}

impl ProductDisplay {
    fn placeholder(id: i64) -> Self {
        Self {
            id,
            sku: String::new(),
            name: MISSING_PRODUCT_NAME.to_string(),
            cost_price: Decimal::ZERO,
            net_sell_price: Decimal::ZERO,
            active: true,
        }
    }
}

impl From<&Product> for ProductDisplay {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            sku: product.sku.clone(),
            name: product.name.clone(),
            cost_price: product.cost_price,
            net_sell_price: product.net_sell_price(),
            active: product.active,
        }
    }
}

/// 維度字典
#[derive(Debug, Clone, Default)]
pub struct DimensionLookup {
    products: HashMap<i64, Product>,
    warehouses: HashMap<i64, Warehouse>,
}

impl DimensionLookup {
    /// 由產品與倉庫清單建立字典
    pub fn new(products: &[Product], warehouses: &[Warehouse]) -> Self {
        Self {
            products: products.iter().map(|p| (p.id, p.clone())).collect(),
            warehouses: warehouses.iter().map(|w| (w.id, w.clone())).collect(),
        }
    }

    /// 查詢產品，找不到時回傳佔位值
    pub fn product(&self, id: i64) -> ProductDisplay {
        match self.products.get(&id) {
            Some(product) => ProductDisplay::from(product),
            None => {
                tracing::debug!("產品 {} 不在字典中，使用佔位值", id);
                ProductDisplay::placeholder(id)
            }
        }
    }

    /// 查詢倉庫名稱，找不到時回傳 `Bodega {id}`
    pub fn warehouse_name(&self, id: i64) -> String {
        match self.warehouses.get(&id) {
            Some(warehouse) => warehouse.name.clone(),
            None => {
                tracing::debug!("倉庫 {} 不在字典中，使用佔位值", id);
                format!("Bodega {}", id)
            }
        }
    }

    /// 啟用中的產品（依ID排序）
    pub fn active_products(&self) -> Vec<&Product> {
        let mut products: Vec<&Product> = self.products.values().filter(|p| p.active).collect();
        products.sort_by_key(|p| p.id);
        products
    }

    /// 檢查產品是否停用（找不到的產品視為啟用）
    pub fn is_inactive(&self, product_id: i64) -> bool {
        self.products
            .get(&product_id)
            .map(|p| !p.active)
            .unwrap_or(false)
    }
}

/// 補全後的庫存列
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedStock {
    pub product_id: i64,
    pub sku: String,
    pub product_name: String,
    pub warehouse_id: i64,
    pub warehouse_name: String,
    pub quantity: Decimal,
    pub cost_price: Decimal,
    pub net_sell_price: Decimal,
}

/// 補全庫存快照
///
/// 停用產品的庫存列不進入快照類視圖。結果依產品名稱、倉庫名稱排序。
pub fn enrich_stock(records: &[InventoryRecord], lookup: &DimensionLookup) -> Vec<EnrichedStock> {
    let mut rows: Vec<EnrichedStock> = records
        .iter()
        .filter(|r| !lookup.is_inactive(r.product_id))
        .map(|r| {
            let product = lookup.product(r.product_id);
            EnrichedStock {
                product_id: r.product_id,
                sku: product.sku,
                product_name: product.name,
                warehouse_id: r.warehouse_id,
                warehouse_name: lookup.warehouse_name(r.warehouse_id),
                quantity: r.quantity,
                cost_price: product.cost_price,
                net_sell_price: product.net_sell_price,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        a.product_name
            .cmp(&b.product_name)
            .then_with(|| a.product_id.cmp(&b.product_id))
            .then_with(|| a.warehouse_name.cmp(&b.warehouse_name))
            .then_with(|| a.warehouse_id.cmp(&b.warehouse_id))
    });
    rows
}

/// 各產品跨倉庫的庫存合計
pub fn stock_by_product(stock: &[EnrichedStock]) -> BTreeMap<i64, Decimal> {
    let mut totals = BTreeMap::new();
    for row in stock {
        *totals.entry(row.product_id).or_insert(Decimal::ZERO) += row.quantity;
    }
    totals
}
