use crate::dashboards::SalesOverviewDashboard;
use crate::shared::api_utils::ApiConfig;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Backend origin for every transport call in the app.
    let config = ApiConfig::from_location();
    log::info!("KPI backend: {}", config.base_url());
    provide_context(config);

    view! {
        <main class="app">
            <SalesOverviewDashboard />
        </main>
    }
}
