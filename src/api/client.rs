use super::Backend;
use crate::error::ApiError;
use crate::host::Session;
use crate::models::{BalanceReply, TransactionsPage, TransactionsQuery, TransferReceipt, TransferRequest};
use reqwest::Url;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub const INIT_DATA_HEADER: &str = "X-Telegram-Init-Data";

/// JSON-over-HTTP backend: `POST {base}/api/{endpoint}`.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// `{base path}/api/{endpoint}`; any query or fragment on the base is dropped.
    fn endpoint_url(&self, endpoint: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["api", endpoint]);
        }
        url
    }

    async fn call<B, T>(&self, endpoint: &str, session: &Session, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let token = HeaderValue::from_str(session.init_data()).map_err(|_| ApiError::InvalidSession)?;

        tracing::debug!(endpoint, "POST");
        let response = self
            .http
            .post(self.endpoint_url(endpoint))
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(INIT_DATA_HEADER, token)
            .json(body)
            .send()
            .await
            .map_err(ApiError::Transport)?;

        let status = response.status();
        let text = response.text().await.map_err(ApiError::Transport)?;
        let reply = decode_reply(status.as_u16(), &text);
        if let Err(ref e) = reply {
            tracing::warn!(endpoint, status = status.as_u16(), "Backend call failed: {e}");
        }
        reply
    }
}

/// Splits the `{success, ...}` envelope into payload or rejection.
///
/// The body is trusted over the status code: a `success:true` body is a
/// success whatever the status, and any parseable body without it is a
/// rejection carrying the backend's `error` text.
pub(crate) fn decode_reply<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| {
        ApiError::InvalidResponse(format!("Body is not JSON (status {status}): {e}"))
    })?;

    let success = value
        .get("success")
        .and_then(serde_json::Value::as_bool)
        .unwrap_or(false);

    if !success {
        let message = value
            .get("error")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string);
        return Err(ApiError::Rejected { status, message });
    }

    serde_json::from_value(value)
        .map_err(|e| ApiError::InvalidResponse(format!("Unexpected payload shape: {e}")))
}

impl Backend for HttpBackend {
    async fn get_balance(&self, session: &Session) -> Result<BalanceReply, ApiError> {
        self.call("get_balance", session, &serde_json::Map::new()).await
    }

    async fn get_transactions(
        &self,
        session: &Session,
        query: TransactionsQuery,
    ) -> Result<TransactionsPage, ApiError> {
        self.call("get_transactions", session, &query).await
    }

    async fn transfer(
        &self,
        session: &Session,
        request: &TransferRequest,
    ) -> Result<TransferReceipt, ApiError> {
        self.call("transfer", session, request).await
    }
}
