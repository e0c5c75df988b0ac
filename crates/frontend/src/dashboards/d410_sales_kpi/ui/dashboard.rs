use super::{BackendStatus, BreakdownPanel, SummaryCards};
use crate::usecases::u510_sales_upload::SalesUpload;
use contracts::dashboards::d410_sales_kpi::SummaryMetrics;
use leptos::prelude::*;

/// Sales overview page: upload, KPI cards, drill-down
#[component]
pub fn SalesOverviewDashboard() -> impl IntoView {
    let (summary, set_summary) = signal(None::<SummaryMetrics>);

    let on_metrics_loaded = Callback::new(move |metrics: SummaryMetrics| {
        log::info!(
            "KPIs loaded: revenue {}, orders {}",
            metrics.total_revenue,
            metrics.total_orders
        );
        set_summary.set(Some(metrics));
    });

    view! {
        <div id="d410_sales_kpi--dashboard" class="d410-dashboard">
            <div class="d410-dashboard__header">
                <h2>"Sales Overview"</h2>
                <BackendStatus />
            </div>

            <SalesUpload on_metrics_loaded=on_metrics_loaded />

            <SummaryCards data=summary />

            <Show when=move || summary.with(Option::is_some)>
                <BreakdownPanel summary=summary />
            </Show>
        </div>
    }
}
