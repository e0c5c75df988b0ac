use crate::dashboards::d410_sales_kpi::breakdown::{
    breakdown_tables, load_breakdown, BreakdownData, BreakdownTab, BreakdownTable,
};
use crate::shared::api_utils::ApiConfig;
use crate::usecases::u510_sales_upload::api::HttpSalesApi;
use contracts::dashboards::d410_sales_kpi::SummaryMetrics;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Time / product / brand / platform drill-down.
///
/// Loads the active tab on demand and again whenever a new summary is
/// published, since that means the backend holds a new dataset.
#[component]
pub fn BreakdownPanel(#[prop(into)] summary: Signal<Option<SummaryMetrics>>) -> impl IntoView {
    let config = use_context::<ApiConfig>().unwrap_or_else(ApiConfig::from_location);
    let api = StoredValue::new(HttpSalesApi::new(config));

    let (active_tab, set_active_tab) = signal(BreakdownTab::Time);
    let (data, set_data) = signal(None::<BreakdownData>);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);

    Effect::new(move |_| {
        let tab = active_tab.get();
        if summary.with(Option::is_none) {
            return;
        }
        set_loading.set(true);
        set_error.set(None);

        spawn_local(async move {
            let result = load_breakdown(&api.get_value(), tab).await;
            // A newer tab may have been selected meanwhile
            if active_tab.get_untracked() != tab {
                return;
            }
            match result {
                Ok(loaded) => set_data.set(Some(loaded)),
                Err(e) => {
                    log::error!("Failed to load {} breakdown: {}", tab.label(), e);
                    set_data.set(None);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    });

    let tabs = BreakdownTab::ALL
        .into_iter()
        .map(|tab| {
            let class = move || {
                if active_tab.get() == tab {
                    "breakdown-panel__tab breakdown-panel__tab--active"
                } else {
                    "breakdown-panel__tab"
                }
            };
            view! {
                <button class=class on:click=move |_| set_active_tab.set(tab)>
                    {tab.label()}
                </button>
            }
        })
        .collect_view();

    view! {
        <div class="breakdown-panel">
            <div class="breakdown-panel__tabs">{tabs}</div>

            {move || loading.get().then(|| view! {
                <div class="breakdown-panel__loading">"Loading..."</div>
            })}

            {move || error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            {move || {
                data.get()
                    .map(|d| breakdown_tables(&d).into_iter().map(render_table).collect_view())
            }}
        </div>
    }
}

fn render_table(table: BreakdownTable) -> impl IntoView {
    let width = table.columns.len();
    let body = if table.rows.is_empty() {
        view! {
            <tr><td colspan=width.to_string() class="table__empty">"No data"</td></tr>
        }
        .into_any()
    } else {
        table
            .rows
            .into_iter()
            .map(|row| {
                view! {
                    <tr>{row.into_iter().map(|cell| view! { <td>{cell}</td> }).collect_view()}</tr>
                }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <div class="breakdown-table">
            <h4 class="breakdown-table__title">{table.title}</h4>
            <table class="table__data">
                <thead>
                    <tr>{table.columns.into_iter().map(|c| view! { <th>{c}</th> }).collect_view()}</tr>
                </thead>
                <tbody>{body}</tbody>
            </table>
        </div>
    }
}
