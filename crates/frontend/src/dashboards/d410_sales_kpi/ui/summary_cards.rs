use crate::shared::components::StatCard;
use crate::shared::format::{format_decimal, ValueFormat};
use contracts::dashboards::d410_sales_kpi::SummaryMetrics;
use leptos::prelude::*;

/// Headline KPI cards; renders nothing until a summary exists
#[component]
pub fn SummaryCards(#[prop(into)] data: Signal<Option<SummaryMetrics>>) -> impl IntoView {
    let pick = move |f: fn(&SummaryMetrics) -> f64| {
        Signal::derive(move || data.get().map(|d| f(&d)))
    };

    let items_per_order = Signal::derive(move || {
        data.get()
            .and_then(|d| d.avg_items_per_order)
            .map(|v| format!("{} items / order", format_decimal(v, 2)))
    });

    view! {
        <Show when=move || data.get().is_some()>
            <div class="summary-cards">
                <StatCard
                    label="Total Revenue".to_string()
                    icon_name="revenue".to_string()
                    value=pick(|d| d.total_revenue)
                    format=ValueFormat::dollars()
                />
                <StatCard
                    label="Total Orders".to_string()
                    icon_name="orders".to_string()
                    value=pick(|d| d.total_orders)
                    format=ValueFormat::Integer
                />
                <StatCard
                    label="AOV".to_string()
                    icon_name="aov".to_string()
                    value=pick(|d| d.aov)
                    format=ValueFormat::dollars()
                />
                <StatCard
                    label="Total Units".to_string()
                    icon_name="units".to_string()
                    value=pick(|d| d.total_units)
                    format=ValueFormat::Integer
                    subtitle=items_per_order
                />
            </div>
        </Show>
    }
}
