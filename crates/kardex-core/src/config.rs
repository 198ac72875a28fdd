//! 分析引擎配置模型

use serde::{Deserialize, Serialize};

use crate::{AnalyticsError, Result};

/// 合成ID起點上限，保留其上的ID範圍給銷售推導分錄
pub const MAX_SYNTHETIC_ID_OFFSET: i64 = i64::MAX / 2;

/// 分析引擎參數配置
///
/// 上限值（cap）只是展示限制，不影響計算正確性。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// 臨界庫存門檻（合計數量 <= 門檻即為臨界）
    pub critical_stock_threshold: i64,

    /// 預設時間窗口長度（天）
    pub default_window_days: u32,

    /// 庫存儀表板週轉率上限
    pub inventory_rotation_cap: usize,

    /// 銷售儀表板週轉率上限
    pub sales_rotation_cap: usize,

    /// 覆蓋天數上限
    pub coverage_cap: usize,

    /// 庫存儀表板呆滯品上限
    pub inventory_dead_stock_cap: usize,

    /// 銷售儀表板無異動產品上限
    pub sales_dead_stock_cap: usize,

    /// 合成ID起點（遠高於任何實際ID）
    pub synthetic_id_offset: i64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            critical_stock_threshold: 3,
            default_window_days: 30,
            inventory_rotation_cap: 100,
            sales_rotation_cap: 50,
            coverage_cap: 200,
            inventory_dead_stock_cap: 200,
            sales_dead_stock_cap: 50,
            synthetic_id_offset: MAX_SYNTHETIC_ID_OFFSET,
        }
    }
}

impl AnalyticsConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 從 JSON 載入配置（缺少的欄位使用預設值）
    ///
    /// # 範例
    /// ```
    /// # use kardex_core::AnalyticsConfig;
    /// let config = AnalyticsConfig::from_json_str(r#"{ "critical_stock_threshold": 5 }"#).unwrap();
    /// assert_eq!(config.critical_stock_threshold, 5);
    /// assert_eq!(config.coverage_cap, 200);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| AnalyticsError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 建構器模式：設置臨界庫存門檻
    pub fn with_critical_stock_threshold(mut self, threshold: i64) -> Self {
        self.critical_stock_threshold = threshold;
        self
    }

    /// 建構器模式：設置預設時間窗口長度
    pub fn with_default_window_days(mut self, days: u32) -> Self {
        self.default_window_days = days;
        self
    }

    /// 建構器模式：設置週轉率上限（庫存 / 銷售）
    pub fn with_rotation_caps(mut self, inventory: usize, sales: usize) -> Self {
        self.inventory_rotation_cap = inventory;
        self.sales_rotation_cap = sales;
        self
    }

    /// 建構器模式：設置覆蓋天數上限
    pub fn with_coverage_cap(mut self, cap: usize) -> Self {
        self.coverage_cap = cap;
        self
    }

    /// 建構器模式：設置呆滯品上限（庫存 / 銷售）
    pub fn with_dead_stock_caps(mut self, inventory: usize, sales: usize) -> Self {
        self.inventory_dead_stock_cap = inventory;
        self.sales_dead_stock_cap = sales;
        self
    }

    /// 建構器模式：設置合成ID起點
    pub fn with_synthetic_id_offset(mut self, offset: i64) -> Self {
        self.synthetic_id_offset = offset;
        self
    }

    /// 驗證配置
    pub fn validate(&self) -> Result<()> {
        if self.default_window_days == 0 {
            return Err(AnalyticsError::InvalidConfig(
                "default_window_days 必須大於 0".to_string(),
            ));
        }
        if self.synthetic_id_offset <= 0 || self.synthetic_id_offset > MAX_SYNTHETIC_ID_OFFSET {
            return Err(AnalyticsError::InvalidConfig(format!(
                "synthetic_id_offset 必須介於 1 與 {} 之間",
                MAX_SYNTHETIC_ID_OFFSET
            )));
        }
        Ok(())
    }
}
