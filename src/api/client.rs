//! HTTP API Client
//!
//! `gloo-net` implementation of [`ExpenseApi`].

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;
use web_sys::{AbortSignal, File, FormData};

use super::dto::{CreatedExpense, Expense, ExpenseDetails, FyStats};
use super::error::{ApiError, ApiResult};
use crate::config::AppConfig;

/// Multipart field carrying the receipt image
pub const IMAGE_FIELD: &str = "image";

/// Operations the views need from the backend
#[async_trait(?Send)]
pub trait ExpenseApi {
    /// Image payload accepted by [`ExpenseApi::create_expense`]
    type Image: Clone + 'static;

    /// Totals for the current financial year
    async fn fy_stats(&self) -> ApiResult<FyStats>;

    /// All expenses in backend order
    async fn list_expenses(&self) -> ApiResult<Vec<Expense>>;

    /// Upload a receipt and create an expense from it
    async fn create_expense(
        &self,
        image: &Self::Image,
        details: &ExpenseDetails,
    ) -> ApiResult<CreatedExpense>;
}

/// Browser HTTP client for the expense backend
#[derive(Clone, Debug)]
pub struct ApiClient {
    config: AppConfig,
    abort: Option<AbortSignal>,
}

impl ApiClient {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            abort: None,
        }
    }

    /// Tie every request made by this client to `signal`
    pub fn with_abort_signal(mut self, signal: AbortSignal) -> Self {
        self.abort = Some(signal);
        self
    }

    fn get(&self, path: &str) -> RequestBuilder {
        Request::get(&self.config.endpoint(path)).abort_signal(self.abort.as_ref())
    }

    fn post(&self, path: &str) -> RequestBuilder {
        Request::post(&self.config.endpoint(path)).abort_signal(self.abort.as_ref())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        tracing::debug!(path, "GET");

        let response = self
            .get(path)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        decode(ensure_ok(response).await?).await
    }
}

#[async_trait(?Send)]
impl ExpenseApi for ApiClient {
    type Image = File;

    async fn fy_stats(&self) -> ApiResult<FyStats> {
        self.get_json("/stats/fy").await
    }

    async fn list_expenses(&self) -> ApiResult<Vec<Expense>> {
        self.get_json("/expenses").await
    }

    async fn create_expense(
        &self,
        image: &File,
        details: &ExpenseDetails,
    ) -> ApiResult<CreatedExpense> {
        let form = FormData::new().map_err(|e| ApiError::Request(js_message(&e)))?;

        form.append_with_blob_and_filename(IMAGE_FIELD, image, &image.name())
            .map_err(|e| ApiError::Request(js_message(&e)))?;

        for (name, value) in details.form_fields() {
            form.append_with_str(name, &value)
                .map_err(|e| ApiError::Request(js_message(&e)))?;
        }

        tracing::debug!(
            file = %image.name(),
            bytes = image.size(),
            "POST /expenses"
        );

        let response = self
            .post("/expenses")
            .body(form)
            .map_err(|e| ApiError::Request(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        decode(ensure_ok(response).await?).await
    }
}

/// Turn a non-2xx response into [`ApiError::Status`] carrying its text body
async fn ensure_ok(response: Response) -> ApiResult<Response> {
    if response.ok() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::from_status(status, body))
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    response
        .json()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Best-effort text for a thrown JS value
pub(crate) fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
