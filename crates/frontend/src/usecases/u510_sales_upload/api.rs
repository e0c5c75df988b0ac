//! Transport client for the KPI backend.
//!
//! One call per endpoint, a single attempt each. Failures of any kind come
//! back as [`TransportError`]; deciding what to do with them is the caller's
//! business.

use super::model::{FileContent, SelectedFile};
use crate::shared::api_utils::ApiConfig;
use async_trait::async_trait;
use contracts::dashboards::d410_sales_kpi::{
    BrandMetrics, PlatformMetrics, ProductMetrics, SummaryMetrics, TimeMetrics,
};
use contracts::shared::error_body::ErrorBody;
use contracts::system::ping::PingResponse;
use contracts::usecases::u510_sales_upload::UploadResult;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;

pub const PING_PATH: &str = "/ping";
pub const UPLOAD_PATH: &str = "/upload";
pub const SUMMARY_PATH: &str = "/metrics/summary";
pub const TIME_PATH: &str = "/metrics/time";
pub const PRODUCT_PATH: &str = "/metrics/product";
pub const BRAND_PATH: &str = "/metrics/brand";
pub const PLATFORM_PATH: &str = "/metrics/platform";

/// Multipart field the backend reads the file from
pub const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Request never produced a response (backend down, CORS, bad URL)
    #[error("backend unreachable: {0}")]
    Network(String),

    #[error("{}", status_text(.status, .detail))]
    Status { status: u16, detail: Option<String> },

    /// Success status, but the body is an error payload
    #[error("{0}")]
    Rejected(String),

    #[error("malformed response: {0}")]
    Decode(String),
}

fn status_text(status: &u16, detail: &Option<String>) -> String {
    match detail {
        Some(detail) => format!("HTTP {}: {}", status, detail),
        None => format!("HTTP {}", status),
    }
}

/// Outbound calls against the KPI backend
#[async_trait(?Send)]
pub trait SalesApi {
    async fn upload_file(&self, file: SelectedFile) -> Result<UploadResult, TransportError>;
    async fn fetch_summary_metrics(&self) -> Result<SummaryMetrics, TransportError>;
    async fn fetch_time_metrics(&self) -> Result<TimeMetrics, TransportError>;
    async fn fetch_product_metrics(&self) -> Result<ProductMetrics, TransportError>;
    async fn fetch_brand_metrics(&self) -> Result<BrandMetrics, TransportError>;
    async fn fetch_platform_metrics(&self) -> Result<PlatformMetrics, TransportError>;
    async fn ping(&self) -> Result<PingResponse, TransportError>;
}

/// Map a status code and body text to the expected payload.
///
/// Non-2xx becomes [`TransportError::Status`], keeping the backend's
/// `detail`/`error` text when there is one. A 2xx body that is an error
/// payload becomes [`TransportError::Rejected`].
pub fn decode_body<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, TransportError> {
    let error_body = ErrorBody::parse(body);

    if !(200..300).contains(&status) {
        return Err(TransportError::Status {
            status,
            detail: error_body.and_then(|b| b.message().map(str::to_string)),
        });
    }

    if let Some(message) = error_body.as_ref().and_then(ErrorBody::message) {
        return Err(TransportError::Rejected(message.to_string()));
    }

    serde_json::from_str(body).map_err(|e| TransportError::Decode(e.to_string()))
}

/// Production client over `fetch`
#[derive(Debug, Clone)]
pub struct HttpSalesApi {
    config: ApiConfig,
}

impl HttpSalesApi {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, TransportError> {
        let url = self.config.url(path);
        let response = Request::get(&url).send().await.map_err(|e| {
            log::error!("GET {} failed: {}", url, e);
            TransportError::Network(e.to_string())
        })?;
        read_response(&url, response).await
    }

    fn build_form(file: &SelectedFile) -> Result<web_sys::FormData, TransportError> {
        let js_err = |e: wasm_bindgen::JsValue| TransportError::Network(format!("{e:?}"));

        let form = web_sys::FormData::new().map_err(js_err)?;
        match &file.content {
            FileContent::Browser(browser_file) => {
                form.append_with_blob_and_filename(UPLOAD_FIELD, browser_file, &file.name)
                    .map_err(js_err)?;
            }
            FileContent::Bytes(bytes) => {
                let array = js_sys::Uint8Array::from(bytes.as_slice());
                let parts = js_sys::Array::of1(&array);
                let options = web_sys::BlobPropertyBag::new();
                options.set_type(&file.media_type);
                let blob =
                    web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
                        .map_err(js_err)?;
                form.append_with_blob_and_filename(UPLOAD_FIELD, &blob, &file.name)
                    .map_err(js_err)?;
            }
        }
        Ok(form)
    }
}

async fn read_response<T: DeserializeOwned>(
    url: &str,
    response: Response,
) -> Result<T, TransportError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| TransportError::Decode(e.to_string()))?;

    decode_body(status, &body).map_err(|e| {
        log::error!("{} -> {}", url, e);
        e
    })
}

#[async_trait(?Send)]
impl SalesApi for HttpSalesApi {
    async fn upload_file(&self, file: SelectedFile) -> Result<UploadResult, TransportError> {
        let url = self.config.url(UPLOAD_PATH);
        log::debug!("Uploading {} ({} bytes) to {}", file.name, file.size, url);

        // No explicit Content-Type: the browser sets the multipart boundary.
        let form = Self::build_form(&file)?;
        let response = Request::post(&url)
            .body(form)
            .map_err(|e| TransportError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| {
                log::error!("POST {} failed: {}", url, e);
                TransportError::Network(e.to_string())
            })?;

        read_response(&url, response).await
    }

    async fn fetch_summary_metrics(&self) -> Result<SummaryMetrics, TransportError> {
        self.get(SUMMARY_PATH).await
    }

    async fn fetch_time_metrics(&self) -> Result<TimeMetrics, TransportError> {
        self.get(TIME_PATH).await
    }

    async fn fetch_product_metrics(&self) -> Result<ProductMetrics, TransportError> {
        self.get(PRODUCT_PATH).await
    }

    async fn fetch_brand_metrics(&self) -> Result<BrandMetrics, TransportError> {
        self.get(BRAND_PATH).await
    }

    async fn fetch_platform_metrics(&self) -> Result<PlatformMetrics, TransportError> {
        self.get(PLATFORM_PATH).await
    }

    async fn ping(&self) -> Result<PingResponse, TransportError> {
        self.get(PING_PATH).await
    }
}

#[cfg(test)]
pub(crate) mod mock {
    //! Recording stand-in for the backend.

    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum MockCall {
        Upload(String),
        Summary,
        Time,
        Product,
        Brand,
        Platform,
        Ping,
    }

    /// Canned responses are served FIFO; an empty queue answers with a
    /// network error.
    #[derive(Default)]
    pub struct MockSalesApi {
        uploads: RefCell<VecDeque<Result<UploadResult, TransportError>>>,
        summaries: RefCell<VecDeque<Result<SummaryMetrics, TransportError>>>,
        calls: RefCell<Vec<MockCall>>,
    }

    impl MockSalesApi {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn add_upload(&self, response: Result<UploadResult, TransportError>) {
            self.uploads.borrow_mut().push_back(response);
        }

        pub fn add_summary(&self, response: Result<SummaryMetrics, TransportError>) {
            self.summaries.borrow_mut().push_back(response);
        }

        pub fn calls(&self) -> Vec<MockCall> {
            self.calls.borrow().clone()
        }

        fn record(&self, call: MockCall) {
            self.calls.borrow_mut().push(call);
        }
    }

    fn unanswered<T>() -> Result<T, TransportError> {
        Err(TransportError::Network("no canned response".to_string()))
    }

    #[async_trait(?Send)]
    impl SalesApi for MockSalesApi {
        async fn upload_file(&self, file: SelectedFile) -> Result<UploadResult, TransportError> {
            self.record(MockCall::Upload(file.name.clone()));
            self.uploads.borrow_mut().pop_front().unwrap_or_else(unanswered)
        }

        async fn fetch_summary_metrics(&self) -> Result<SummaryMetrics, TransportError> {
            self.record(MockCall::Summary);
            self.summaries.borrow_mut().pop_front().unwrap_or_else(unanswered)
        }

        async fn fetch_time_metrics(&self) -> Result<TimeMetrics, TransportError> {
            self.record(MockCall::Time);
            Ok(TimeMetrics::default())
        }

        async fn fetch_product_metrics(&self) -> Result<ProductMetrics, TransportError> {
            self.record(MockCall::Product);
            Ok(ProductMetrics::default())
        }

        async fn fetch_brand_metrics(&self) -> Result<BrandMetrics, TransportError> {
            self.record(MockCall::Brand);
            Ok(BrandMetrics::default())
        }

        async fn fetch_platform_metrics(&self) -> Result<PlatformMetrics, TransportError> {
            self.record(MockCall::Platform);
            Ok(PlatformMetrics::default())
        }

        async fn ping(&self) -> Result<PingResponse, TransportError> {
            self.record(MockCall::Ping);
            Ok(PingResponse {
                message: "pong".to_string(),
            })
        }
    }
}
