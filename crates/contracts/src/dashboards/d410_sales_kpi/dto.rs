use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Headline KPIs returned by `GET /metrics/summary`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub total_revenue: f64,
    pub total_orders: f64,
    /// Average order value, `total_revenue / total_orders`
    pub aov: f64,
    pub total_units: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_items_per_order: Option<f64>,
}

impl SummaryMetrics {
    pub fn new(total_revenue: f64, total_orders: f64, aov: f64, total_units: f64) -> Self {
        Self {
            total_revenue,
            total_orders,
            aov,
            total_units,
            avg_items_per_order: None,
        }
    }
}

/// Monthly revenue series, keyed by "YYYY-MM"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeMetrics {
    #[serde(default)]
    pub monthly_revenue: BTreeMap<String, f64>,
    /// Month-over-month growth, %
    #[serde(default)]
    pub mom_growth: BTreeMap<String, f64>,
    /// Year-over-year growth, %
    #[serde(default)]
    pub yoy_growth: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductMetrics {
    #[serde(default)]
    pub top_products_by_revenue: HashMap<String, f64>,
    #[serde(default)]
    pub top_products_by_units: HashMap<String, f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrandMetrics {
    #[serde(default)]
    pub revenue_by_brand: HashMap<String, f64>,
    #[serde(default)]
    pub units_by_brand: HashMap<String, f64>,
    /// Share of total revenue, %
    #[serde(default)]
    pub revenue_share_by_brand: HashMap<String, f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformMetrics {
    #[serde(default)]
    pub revenue_by_platform: HashMap<String, f64>,
    #[serde(default)]
    pub orders_by_platform: HashMap<String, f64>,
    #[serde(default)]
    pub aov_by_platform: HashMap<String, f64>,
    #[serde(default)]
    pub units_per_order_by_platform: HashMap<String, f64>,
}

/// Entries sorted by value, largest first; equal values ordered by name.
///
/// JSON objects lose the backend's ordering, so every ranked table goes
/// through here.
pub fn ranked(map: &HashMap<String, f64>) -> Vec<(String, f64)> {
    let mut rows: Vec<(String, f64)> = map.iter().map(|(k, v)| (k.clone(), *v)).collect();
    rows.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    rows
}
