use crate::shared::api_utils::ApiConfig;
use crate::usecases::u510_sales_upload::api::{HttpSalesApi, SalesApi};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Liveness badge, pings the backend once on mount
#[component]
pub fn BackendStatus() -> impl IntoView {
    let config = use_context::<ApiConfig>().unwrap_or_else(ApiConfig::from_location);
    let base_url = config.base_url().to_string();
    let api = StoredValue::new(HttpSalesApi::new(config));
    let (status, set_status) = signal(None::<Result<String, String>>);

    Effect::new(move |_| {
        spawn_local(async move {
            let result = api
                .get_value()
                .ping()
                .await
                .map(|p| p.message)
                .map_err(|e| e.to_string());
            if let Err(e) = &result {
                log::warn!("Backend ping failed: {}", e);
            }
            set_status.set(Some(result));
        });
    });

    move || match status.get() {
        None => view! {
            <span class="backend-status backend-status--pending">"Connecting..."</span>
        }
        .into_any(),
        Some(Ok(message)) => view! {
            <span class="backend-status backend-status--ok" title=message>
                "Backend connected"
            </span>
        }
        .into_any(),
        Some(Err(e)) => view! {
            <span class="backend-status backend-status--error" title=e>
                {format!("Backend offline ({})", base_url)}
            </span>
        }
        .into_any(),
    }
}
