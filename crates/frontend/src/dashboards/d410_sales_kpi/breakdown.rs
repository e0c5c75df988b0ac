//! Drill-down breakdowns: loading through the transport and flattening
//! into display tables.

use crate::shared::format::{format_value, ValueFormat};
use crate::usecases::u510_sales_upload::api::{SalesApi, TransportError};
use contracts::dashboards::d410_sales_kpi::{
    ranked, BrandMetrics, PlatformMetrics, ProductMetrics, TimeMetrics,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BreakdownTab {
    Time,
    Product,
    Brand,
    Platform,
}

impl BreakdownTab {
    pub const ALL: [BreakdownTab; 4] = [Self::Time, Self::Product, Self::Brand, Self::Platform];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Time => "Time",
            Self::Product => "Products",
            Self::Brand => "Brands",
            Self::Platform => "Platforms",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BreakdownData {
    Time(TimeMetrics),
    Product(ProductMetrics),
    Brand(BrandMetrics),
    Platform(PlatformMetrics),
}

/// One rendered table: header plus already formatted cells
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownTable {
    pub title: String,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

pub async fn load_breakdown<A: SalesApi + ?Sized>(
    api: &A,
    tab: BreakdownTab,
) -> Result<BreakdownData, TransportError> {
    match tab {
        BreakdownTab::Time => api.fetch_time_metrics().await.map(BreakdownData::Time),
        BreakdownTab::Product => api.fetch_product_metrics().await.map(BreakdownData::Product),
        BreakdownTab::Brand => api.fetch_brand_metrics().await.map(BreakdownData::Brand),
        BreakdownTab::Platform => api
            .fetch_platform_metrics()
            .await
            .map(BreakdownData::Platform),
    }
}

pub fn breakdown_tables(data: &BreakdownData) -> Vec<BreakdownTable> {
    let money = ValueFormat::dollars();
    let pct = ValueFormat::Percent { decimals: 2 };
    let int = ValueFormat::Integer;
    let dec = ValueFormat::Number { decimals: 2 };

    match data {
        BreakdownData::Time(time) => {
            let rows = time
                .monthly_revenue
                .iter()
                .map(|(month, revenue)| {
                    vec![
                        month.clone(),
                        format_value(*revenue, &money),
                        format_value(time.mom_growth.get(month).copied().unwrap_or(0.0), &pct),
                        format_value(time.yoy_growth.get(month).copied().unwrap_or(0.0), &pct),
                    ]
                })
                .collect();
            vec![BreakdownTable {
                title: "Monthly revenue".to_string(),
                columns: vec!["Month", "Revenue", "MoM", "YoY"],
                rows,
            }]
        }

        BreakdownData::Product(products) => vec![
            BreakdownTable {
                title: "Top products by revenue".to_string(),
                columns: vec!["Product", "Revenue"],
                rows: ranked(&products.top_products_by_revenue)
                    .into_iter()
                    .map(|(name, v)| vec![name, format_value(v, &money)])
                    .collect(),
            },
            BreakdownTable {
                title: "Top products by units".to_string(),
                columns: vec!["Product", "Units"],
                rows: ranked(&products.top_products_by_units)
                    .into_iter()
                    .map(|(name, v)| vec![name, format_value(v, &int)])
                    .collect(),
            },
        ],

        BreakdownData::Brand(brands) => {
            let rows = ranked(&brands.revenue_by_brand)
                .into_iter()
                .map(|(brand, revenue)| {
                    let share = brands.revenue_share_by_brand.get(&brand).copied();
                    let units = brands.units_by_brand.get(&brand).copied();
                    vec![
                        brand,
                        format_value(revenue, &money),
                        share.map(|v| format_value(v, &pct)).unwrap_or_default(),
                        units.map(|v| format_value(v, &int)).unwrap_or_default(),
                    ]
                })
                .collect();
            vec![BreakdownTable {
                title: "Revenue by brand".to_string(),
                columns: vec!["Brand", "Revenue", "Share", "Units"],
                rows,
            }]
        }

        BreakdownData::Platform(platforms) => {
            let cell = |map: &std::collections::HashMap<String, f64>,
                        key: &str,
                        fmt: &ValueFormat| {
                map.get(key)
                    .map(|v| format_value(*v, fmt))
                    .unwrap_or_default()
            };
            let rows = ranked(&platforms.revenue_by_platform)
                .into_iter()
                .map(|(platform, revenue)| {
                    let orders = cell(&platforms.orders_by_platform, &platform, &int);
                    let aov = cell(&platforms.aov_by_platform, &platform, &money);
                    let units = cell(&platforms.units_per_order_by_platform, &platform, &dec);
                    vec![platform, format_value(revenue, &money), orders, aov, units]
                })
                .collect();
            vec![BreakdownTable {
                title: "Sales by platform".to_string(),
                columns: vec!["Platform", "Revenue", "Orders", "AOV", "Units / order"],
                rows,
            }]
        }
    }
}
