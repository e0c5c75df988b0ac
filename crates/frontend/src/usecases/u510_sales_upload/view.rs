use super::api::HttpSalesApi;
use super::model::{drive, SelectedFile, UploadEvent, UploadOrchestrator};
use crate::shared::api_utils::ApiConfig;
use crate::shared::icons::icon;
use contracts::dashboards::d410_sales_kpi::SummaryMetrics;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use wasm_bindgen::JsCast;

/// Accepted at the file picker only; the backend decides what it can parse
pub const ACCEPTED_EXTENSIONS: &str = ".csv,.xlsx";

/// File picker plus upload trigger.
///
/// Uploads the chosen file, then requests the KPI summary and hands it to
/// `on_metrics_loaded`.
#[component]
pub fn SalesUpload(
    /// Receives the summary once both calls succeeded
    on_metrics_loaded: Callback<SummaryMetrics>,
) -> impl IntoView {
    let config = use_context::<ApiConfig>().unwrap_or_else(ApiConfig::from_location);
    let api = StoredValue::new(HttpSalesApi::new(config));

    // SelectedFile holds a web_sys::File, which is not Send
    let orchestrator = RwSignal::new_local(UploadOrchestrator::new());

    let handle_file_select = move |ev: web_sys::Event| {
        let file = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
            .map(SelectedFile::from_browser);

        orchestrator.update(|o| {
            o.handle(UploadEvent::FileSelected(file));
        });
    };

    let handle_upload = move |_| {
        let Some(command) = orchestrator
            .try_update(|o| o.handle(UploadEvent::TriggerPressed))
            .flatten()
        else {
            return;
        };

        spawn_local(async move {
            let api = api.get_value();
            let dispatch = move |event| orchestrator.try_update(|o| o.handle(event)).flatten();
            if let Some(summary) = drive(&api, command, dispatch).await {
                on_metrics_loaded.run(summary);
            }
        });
    };

    let file_info = move || {
        orchestrator.with(|o| match o.selected_file() {
            Some(file) => view! {
                <span class="sales-upload__fileinfo">
                    <strong>{file.name.clone()}</strong>
                    {format!(" ({:.2} KB)", file.size as f64 / 1024.0)}
                </span>
            }
            .into_any(),
            None => view! {
                <span class="sales-upload__filehint">"No file selected"</span>
            }
            .into_any(),
        })
    };

    let error_view = move || {
        orchestrator
            .with(|o| o.state().error_message())
            .map(|e| {
                view! {
                    <div class="warning-box warning-box--error sales-upload__error">
                        <span class="warning-box__icon">"⚠"</span>
                        <span class="warning-box__text">{e}</span>
                    </div>
                }
            })
    };

    let feedback_view = move || {
        orchestrator
            .with(|o| o.last_upload().cloned())
            .map(|result| {
                view! {
                    <div class="sales-upload__result">
                        <p class="sales-upload__result-message">{result.message}</p>
                        <p>{format!("Rows: {}", result.rows)}</p>
                        <p>{format!("Columns: {}", result.columns)}</p>
                        <p>{format!("Fields: {}", result.column_names.join(", "))}</p>
                    </div>
                }
            })
    };

    view! {
        <div class="sales-upload">
            <h3 class="sales-upload__title">"Upload Sales Data"</h3>

            <div class="sales-upload__filebar">
                <label class="button button--secondary sales-upload__file-btn" for="sales-file-input">
                    {icon("file")}
                    " Choose file"
                </label>
                <input
                    id="sales-file-input"
                    type="file"
                    accept=ACCEPTED_EXTENSIONS
                    on:change=handle_file_select
                    class="hidden"
                />
                {file_info}
            </div>

            <Button
                appearance=ButtonAppearance::Primary
                on_click=handle_upload
                disabled=Signal::derive(move || !orchestrator.with(|o| o.state().trigger_enabled()))
            >
                {icon("upload")}
                {move || orchestrator.with(|o| o.state().trigger_label())}
            </Button>

            {error_view}
            {feedback_view}
        </div>
    }
}
