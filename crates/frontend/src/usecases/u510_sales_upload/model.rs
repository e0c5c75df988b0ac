//! Upload-then-fetch orchestration.
//!
//! [`UploadOrchestrator`] is a plain state machine: events go in through
//! [`UploadOrchestrator::handle`], commands for the transport come out.
//! [`drive`] executes those commands against a [`SalesApi`] and feeds the
//! results back, so the same flow runs inside the Leptos view and in tests.

use super::api::{SalesApi, TransportError};
use contracts::dashboards::d410_sales_kpi::SummaryMetrics;
use contracts::usecases::u510_sales_upload::UploadResult;
use thiserror::Error;

/// Bytes behind a [`SelectedFile`]
#[derive(Debug, Clone)]
pub enum FileContent {
    /// Picked through an `<input type="file">`
    Browser(web_sys::File),
    Bytes(Vec<u8>),
}

/// File chosen by the user, held until an attempt hands it to the transport
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub media_type: String,
    pub size: u64,
    pub content: FileContent,
}

impl SelectedFile {
    pub fn from_browser(file: web_sys::File) -> Self {
        Self {
            name: file.name(),
            media_type: file.type_(),
            size: file.size() as u64,
            content: FileContent::Browser(file),
        }
    }

    pub fn from_bytes(
        name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            size: bytes.len() as u64,
            content: FileContent::Bytes(bytes),
        }
    }
}

/// Why an attempt failed; `Display` is the text shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Please select a file first")]
    NoFileSelected,

    #[error("Upload failed: {0}")]
    Upload(TransportError),

    #[error("KPI calculation failed: {0}")]
    Summary(TransportError),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum OperationState {
    #[default]
    Idle,
    Loading,
    Succeeded(SummaryMetrics),
    Failed(UploadError),
}

impl OperationState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn trigger_enabled(&self) -> bool {
        !self.is_loading()
    }

    pub fn trigger_label(&self) -> &'static str {
        if self.is_loading() {
            "Uploading..."
        } else {
            "Upload"
        }
    }

    pub fn error_message(&self) -> Option<String> {
        match self {
            Self::Failed(err) => Some(err.to_string()),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Succeeded(_) => "succeeded",
            Self::Failed(_) => "failed",
        }
    }
}

#[derive(Debug, Clone)]
pub enum UploadEvent {
    /// `None` when the input was cleared
    FileSelected(Option<SelectedFile>),
    TriggerPressed,
    UploadCompleted(Result<UploadResult, TransportError>),
    SummaryCompleted(Result<SummaryMetrics, TransportError>),
}

/// Side effect requested by the orchestrator
#[derive(Debug, Clone)]
pub enum UploadCommand {
    Upload(SelectedFile),
    FetchSummary,
    Publish(SummaryMetrics),
}

#[derive(Debug, Default)]
pub struct UploadOrchestrator {
    selected_file: Option<SelectedFile>,
    state: OperationState,
    last_upload: Option<UploadResult>,
}

impl UploadOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &OperationState {
        &self.state
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_file.as_ref()
    }

    /// Backend answer to the upload of the current or last attempt
    pub fn last_upload(&self) -> Option<&UploadResult> {
        self.last_upload.as_ref()
    }

    /// Apply one event. At most one attempt is in flight: `TriggerPressed`
    /// is ignored while loading, and completions outside an attempt are
    /// dropped.
    pub fn handle(&mut self, event: UploadEvent) -> Option<UploadCommand> {
        match event {
            UploadEvent::FileSelected(file) => {
                self.selected_file = file;
                // The running attempt owns its own copy; the new file waits.
                if !self.state.is_loading() {
                    self.transition(OperationState::Idle);
                }
                None
            }

            UploadEvent::TriggerPressed => {
                if self.state.is_loading() {
                    log::debug!("Upload already in flight, trigger ignored");
                    return None;
                }
                match self.selected_file.clone() {
                    None => {
                        self.transition(OperationState::Failed(UploadError::NoFileSelected));
                        None
                    }
                    Some(file) => {
                        self.last_upload = None;
                        self.transition(OperationState::Loading);
                        Some(UploadCommand::Upload(file))
                    }
                }
            }

            UploadEvent::UploadCompleted(result) => {
                if !self.state.is_loading() {
                    log::warn!("Upload result outside an attempt, dropped");
                    return None;
                }
                match result {
                    Ok(upload) => {
                        log::info!(
                            "Upload accepted: {} rows, {} columns",
                            upload.rows,
                            upload.columns
                        );
                        self.last_upload = Some(upload);
                        Some(UploadCommand::FetchSummary)
                    }
                    Err(err) => {
                        self.transition(OperationState::Failed(UploadError::Upload(err)));
                        None
                    }
                }
            }

            UploadEvent::SummaryCompleted(result) => {
                if !self.state.is_loading() {
                    log::warn!("Summary result outside an attempt, dropped");
                    return None;
                }
                match result {
                    Ok(summary) => {
                        self.transition(OperationState::Succeeded(summary.clone()));
                        Some(UploadCommand::Publish(summary))
                    }
                    Err(err) => {
                        self.transition(OperationState::Failed(UploadError::Summary(err)));
                        None
                    }
                }
            }
        }
    }

    fn transition(&mut self, next: OperationState) {
        if let OperationState::Failed(err) = &next {
            log::error!("{}", err);
        }
        log::debug!("Upload state: {} -> {}", self.state.name(), next.name());
        self.state = next;
    }
}

/// Run `command` and every follow-up against `api`.
///
/// `dispatch` applies each completion to the orchestrator (wherever it
/// lives) and returns the next command. Resolves to the published summary,
/// or `None` once the orchestrator stops issuing commands.
pub async fn drive<A, F>(api: &A, command: UploadCommand, mut dispatch: F) -> Option<SummaryMetrics>
where
    A: SalesApi + ?Sized,
    F: FnMut(UploadEvent) -> Option<UploadCommand>,
{
    let mut command = command;
    loop {
        let event = match command {
            UploadCommand::Upload(file) => UploadEvent::UploadCompleted(api.upload_file(file).await),
            UploadCommand::FetchSummary => {
                UploadEvent::SummaryCompleted(api.fetch_summary_metrics().await)
            }
            UploadCommand::Publish(summary) => return Some(summary),
        };
        command = dispatch(event)?;
    }
}

#[cfg(test)]
mod tests {
    use super::super::api::mock::{MockCall, MockSalesApi};
    use super::*;
    use futures::executor::block_on;

    fn sales_csv() -> SelectedFile {
        SelectedFile::from_bytes(
            "sales.csv",
            "text/csv",
            b"date,sku,qty,price,brand,platform\n".to_vec(),
        )
    }

    fn upload_ok() -> UploadResult {
        UploadResult {
            message: "ok".to_string(),
            rows: 120,
            columns: 6,
            column_names: ["date", "sku", "qty", "price", "brand", "platform"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    fn summary_ok() -> SummaryMetrics {
        SummaryMetrics::new(15000.0, 120.0, 125.0, 480.0)
    }

    fn server_error() -> TransportError {
        TransportError::Status {
            status: 500,
            detail: None,
        }
    }

    /// Press the trigger and drive the attempt to completion
    fn attempt(orch: &mut UploadOrchestrator, api: &MockSalesApi) -> Option<SummaryMetrics> {
        let command = orch.handle(UploadEvent::TriggerPressed)?;
        block_on(drive(api, command, |event| orch.handle(event)))
    }

    #[test]
    fn test_successful_attempt_publishes_summary() {
        let api = MockSalesApi::new();
        api.add_upload(Ok(upload_ok()));
        api.add_summary(Ok(summary_ok()));

        let mut orch = UploadOrchestrator::new();
        orch.handle(UploadEvent::FileSelected(Some(sales_csv())));
        let published = attempt(&mut orch, &api);

        assert_eq!(published, Some(summary_ok()));
        assert_eq!(orch.state(), &OperationState::Succeeded(summary_ok()));
        assert_eq!(orch.last_upload(), Some(&upload_ok()));
        assert_eq!(
            api.calls(),
            vec![MockCall::Upload("sales.csv".to_string()), MockCall::Summary]
        );
    }

    #[test]
    fn test_trigger_without_file() {
        let api = MockSalesApi::new();
        let mut orch = UploadOrchestrator::new();

        let published = attempt(&mut orch, &api);

        assert_eq!(published, None);
        assert_eq!(
            orch.state(),
            &OperationState::Failed(UploadError::NoFileSelected)
        );
        assert_eq!(
            orch.state().error_message().as_deref(),
            Some("Please select a file first")
        );
        assert!(api.calls().is_empty());
    }

    #[test]
    fn test_upload_failure_skips_summary() {
        let api = MockSalesApi::new();
        api.add_upload(Err(server_error()));
        api.add_summary(Ok(summary_ok()));

        let mut orch = UploadOrchestrator::new();
        orch.handle(UploadEvent::FileSelected(Some(sales_csv())));
        let published = attempt(&mut orch, &api);

        assert_eq!(published, None);
        assert_eq!(
            orch.state(),
            &OperationState::Failed(UploadError::Upload(server_error()))
        );
        assert_eq!(
            orch.state().error_message().as_deref(),
            Some("Upload failed: HTTP 500")
        );
        assert_eq!(api.calls(), vec![MockCall::Upload("sales.csv".to_string())]);
        assert!(orch.last_upload().is_none());
    }

    #[test]
    fn test_summary_failure() {
        let api = MockSalesApi::new();
        api.add_upload(Ok(upload_ok()));
        api.add_summary(Err(TransportError::Network("connection refused".to_string())));

        let mut orch = UploadOrchestrator::new();
        orch.handle(UploadEvent::FileSelected(Some(sales_csv())));
        let published = attempt(&mut orch, &api);

        assert_eq!(published, None);
        assert_eq!(
            orch.state().error_message().as_deref(),
            Some("KPI calculation failed: backend unreachable: connection refused")
        );
        assert!(!orch.state().is_loading());
        assert_eq!(api.calls().len(), 2);
    }

    #[test]
    fn test_second_trigger_while_loading_is_noop() {
        let api = MockSalesApi::new();
        api.add_upload(Ok(upload_ok()));
        api.add_summary(Ok(summary_ok()));

        let mut orch = UploadOrchestrator::new();
        orch.handle(UploadEvent::FileSelected(Some(sales_csv())));

        let first = orch.handle(UploadEvent::TriggerPressed).unwrap();
        assert!(orch.state().is_loading());
        assert!(!orch.state().trigger_enabled());
        assert_eq!(orch.state().trigger_label(), "Uploading...");
        assert!(orch.handle(UploadEvent::TriggerPressed).is_none());

        let published = block_on(drive(&api, first, |event| orch.handle(event)));

        assert_eq!(published, Some(summary_ok()));
        assert_eq!(
            api.calls(),
            vec![MockCall::Upload("sales.csv".to_string()), MockCall::Summary]
        );
    }

    #[test]
    fn test_new_file_after_failure_resets() {
        let mut orch = UploadOrchestrator::new();
        orch.handle(UploadEvent::TriggerPressed);
        assert!(orch.state().error_message().is_some());

        orch.handle(UploadEvent::FileSelected(Some(sales_csv())));

        assert_eq!(orch.state(), &OperationState::Idle);
        assert!(orch.state().error_message().is_none());
        assert_eq!(orch.selected_file().map(|f| f.name.as_str()), Some("sales.csv"));
        assert!(orch.state().trigger_enabled());
        assert_eq!(orch.state().trigger_label(), "Upload");
    }

    #[test]
    fn test_new_file_after_success_returns_to_idle() {
        let api = MockSalesApi::new();
        api.add_upload(Ok(upload_ok()));
        api.add_summary(Ok(summary_ok()));

        let mut orch = UploadOrchestrator::new();
        orch.handle(UploadEvent::FileSelected(Some(sales_csv())));
        attempt(&mut orch, &api);

        let next = SelectedFile::from_bytes("march.xlsx", "application/vnd.ms-excel", vec![1, 2]);
        orch.handle(UploadEvent::FileSelected(Some(next)));

        assert_eq!(orch.state(), &OperationState::Idle);
        assert_eq!(orch.selected_file().map(|f| f.size), Some(2));
    }

    #[test]
    fn test_retry_after_failure_issues_fresh_attempt() {
        let api = MockSalesApi::new();
        api.add_upload(Err(server_error()));
        api.add_upload(Ok(upload_ok()));
        api.add_summary(Ok(summary_ok()));

        let mut orch = UploadOrchestrator::new();
        orch.handle(UploadEvent::FileSelected(Some(sales_csv())));
        assert_eq!(attempt(&mut orch, &api), None);
        assert_eq!(attempt(&mut orch, &api), Some(summary_ok()));

        assert_eq!(
            api.calls(),
            vec![
                MockCall::Upload("sales.csv".to_string()),
                MockCall::Upload("sales.csv".to_string()),
                MockCall::Summary,
            ]
        );
    }

    #[test]
    fn test_file_selected_while_loading_keeps_attempt() {
        let mut orch = UploadOrchestrator::new();
        orch.handle(UploadEvent::FileSelected(Some(sales_csv())));
        let command = orch.handle(UploadEvent::TriggerPressed);
        assert!(matches!(command, Some(UploadCommand::Upload(ref f)) if f.name == "sales.csv"));

        let next = SelectedFile::from_bytes("april.csv", "text/csv", Vec::new());
        orch.handle(UploadEvent::FileSelected(Some(next)));

        assert!(orch.state().is_loading());
        assert_eq!(orch.selected_file().map(|f| f.name.as_str()), Some("april.csv"));
    }

    #[test]
    fn test_completion_outside_attempt_is_dropped() {
        let mut orch = UploadOrchestrator::new();

        assert!(orch
            .handle(UploadEvent::UploadCompleted(Ok(upload_ok())))
            .is_none());
        assert!(orch
            .handle(UploadEvent::SummaryCompleted(Ok(summary_ok())))
            .is_none());
        assert_eq!(orch.state(), &OperationState::Idle);
        assert!(orch.last_upload().is_none());
    }

    #[test]
    fn test_cleared_input_then_trigger() {
        let mut orch = UploadOrchestrator::new();
        orch.handle(UploadEvent::FileSelected(Some(sales_csv())));
        orch.handle(UploadEvent::FileSelected(None));

        assert!(orch.handle(UploadEvent::TriggerPressed).is_none());
        assert_eq!(
            orch.state(),
            &OperationState::Failed(UploadError::NoFileSelected)
        );
    }
}
