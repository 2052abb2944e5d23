use std::sync::Arc;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::config::TushareConfig;
use crate::error::TushareError;
use crate::params::Params;

/// Request body accepted by the Tushare Pro endpoint.
#[derive(Debug, Serialize)]
struct TushareRequest<'a> {
    api_name: &'a str,
    token: &'a str,
    params: &'a Params,
    /// Empty selects every field.
    fields: &'a str,
}

/// Outer response envelope. `data` stays untyped until `code` is checked,
/// because failed calls may carry a payload of any shape.
#[derive(Debug, Deserialize)]
struct TushareResponse {
    #[serde(default)]
    request_id: Option<String>,
    code: i64,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    data: Option<Value>,
}

/// Payload of a successful call.
///
/// A key that is absent or `null` reads as its empty default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(bound(deserialize = "R: Deserialize<'de>"))]
pub struct ResponseData<R> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub fields: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<R>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_more: bool,
    #[serde(default)]
    pub count: Option<i64>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl<R> Default for ResponseData<R> {
    fn default() -> Self {
        Self {
            fields: Vec::new(),
            items: Vec::new(),
            has_more: false,
            count: None,
        }
    }
}

/// Client for the Tushare Pro HTTP API.
///
/// Every [`TushareClient::call`] is one fresh POST: no retries, no caching.
#[derive(Debug, Clone)]
pub struct TushareClient {
    http: Client,
    config: Arc<TushareConfig>,
}

impl TushareClient {
    /// Builds a client whose requests are bounded by `config.timeout`.
    ///
    /// # Errors
    /// Returns [`TushareError::Client`] if the HTTP client cannot be built.
    pub fn new(config: TushareConfig) -> Result<Self, TushareError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(TushareError::Client)?;
        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    #[must_use]
    pub fn config(&self) -> &TushareConfig {
        &self.config
    }

    /// Calls `api_name` with `params` and decodes the rows as `R`.
    ///
    /// The call is abandoned when `cancel` fires.
    ///
    /// # Errors
    /// Returns a [`TushareError`] for a missing token, transport failure,
    /// timeout, cancellation, non-2xx status, non-zero envelope code, or a
    /// payload that does not match `R`.
    pub async fn call<R>(
        &self,
        api_name: &str,
        params: &Params,
        cancel: &CancellationToken,
    ) -> Result<ResponseData<R>, TushareError>
    where
        R: DeserializeOwned,
    {
        let outcome = match self.config.token.as_deref() {
            None => Err(TushareError::MissingToken),
            Some(token) => {
                info!(api_name, ?params, "正在调用 Tushare API");
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => Err(TushareError::Cancelled {
                        api_name: api_name.to_string(),
                    }),
                    result = self.send(api_name, token, params) => result,
                }
            }
        };

        match &outcome {
            Ok(data) => info!(api_name, items = data.items.len(), "成功调用 Tushare API"),
            Err(err) => error!(api_name, error = %err, "调用 Tushare API 失败"),
        }
        outcome
    }

    async fn send<R>(
        &self,
        api_name: &str,
        token: &str,
        params: &Params,
    ) -> Result<ResponseData<R>, TushareError>
    where
        R: DeserializeOwned,
    {
        let timeout = self.config.timeout;
        let body = TushareRequest {
            api_name,
            token,
            params,
            fields: "",
        };

        let response = self
            .http
            .post(self.config.api_url.clone())
            .json(&body)
            .send()
            .await
            .map_err(|err| TushareError::transport(api_name, timeout, err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TushareError::Http {
                status: status.as_u16(),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|err| TushareError::transport(api_name, timeout, err))?;
        let envelope: TushareResponse =
            serde_json::from_str(&text).map_err(|err| TushareError::decode(api_name, err))?;
        envelope.into_data(api_name)
    }
}

impl TushareResponse {
    fn into_data<R>(self, api_name: &str) -> Result<ResponseData<R>, TushareError>
    where
        R: DeserializeOwned,
    {
        if let Some(request_id) = self.request_id.as_deref() {
            tracing::debug!(api_name, request_id, code = self.code, "Tushare 响应");
        }

        if self.code != 0 {
            return Err(TushareError::Upstream {
                code: self.code,
                message: self.msg.unwrap_or_default(),
            });
        }

        match self.data {
            None | Some(Value::Null) => Ok(ResponseData::default()),
            Some(data) => {
                serde_json::from_value(data).map_err(|err| TushareError::decode(api_name, err))
            }
        }
    }
}
