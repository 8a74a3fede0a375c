use crate::connect::reference::{OperationKind, OperationRef};
use crate::error::{MarqueeError, Result};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where a result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Cache,
    Server,
}

/// Typed payload plus metadata
#[derive(Debug, Clone, PartialEq)]
pub struct OperationResult<D> {
    pub data: D,
    pub source: DataSource,
    pub operation_name: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExecuteRequest<'a> {
    name: String,
    operation_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    variables: Option<&'a Value>,
}

#[derive(Debug, Deserialize)]
struct ExecuteResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    #[serde(default)]
    message: String,
}

/// Google API error envelope used for non-2xx bodies
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorStatus,
}

#[derive(Debug, Deserialize)]
struct ErrorStatus {
    #[serde(default)]
    message: String,
}

/// Run a query reference against its connector
pub async fn execute_query<D: DeserializeOwned>(reference: &OperationRef<D>) -> Result<OperationResult<D>> {
    expect_kind(reference, OperationKind::Query)?;
    execute(reference, "executeQuery").await
}

/// Run a mutation reference against its connector
pub async fn execute_mutation<D: DeserializeOwned>(
    reference: &OperationRef<D>,
) -> Result<OperationResult<D>> {
    expect_kind(reference, OperationKind::Mutation)?;
    execute(reference, "executeMutation").await
}

/// Run a reference with the executor matching its kind
pub async fn execute_ref<D: DeserializeOwned>(reference: &OperationRef<D>) -> Result<OperationResult<D>> {
    match reference.kind() {
        OperationKind::Query => execute(reference, "executeQuery").await,
        OperationKind::Mutation => execute(reference, "executeMutation").await,
    }
}

fn expect_kind<D>(reference: &OperationRef<D>, kind: OperationKind) -> Result<()> {
    if reference.kind() != kind {
        return Err(MarqueeError::invalid(format!(
            "{} is a {}, not a {}",
            reference.name(),
            reference.kind(),
            kind
        )));
    }
    Ok(())
}

/// `X-Goog-Api-Client` value; generated-code usage is reported to the backend
pub(crate) fn api_client_header(generated: bool) -> String {
    let mut value = format!("gl-rust fire/{}", env!("CARGO_PKG_VERSION"));
    if generated {
        value.push_str(" rust/gen");
    }
    value
}

async fn execute<D: DeserializeOwned>(reference: &OperationRef<D>, method: &str) -> Result<OperationResult<D>> {
    let dc = reference.client();
    let resource = dc.resource_name();
    let url = format!("{}/v1/{}:{}", dc.origin(), resource, method);

    tracing::debug!("Executing {} {} via {}", reference.kind(), reference.name(), url);

    let body = ExecuteRequest {
        name: resource,
        operation_name: reference.name(),
        variables: reference.variables(),
    };

    let mut request = dc
        .http()
        .post(&url)
        .header("x-goog-api-key", dc.api_key())
        .header("X-Goog-Api-Client", api_client_header(dc.is_generated_sdk()))
        .json(&body);

    if let Some(app_id) = dc.app_id() {
        request = request.header("X-Firebase-GMPID", app_id);
    }
    if let Some(token) = dc.auth_token() {
        request = request.header("X-Firebase-Auth-Token", token);
    }

    let response = request.send().await?;
    let status = response.status();

    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        return Err(status_error(reference.name(), status, &text));
    }

    let envelope: ExecuteResponse = response
        .json()
        .await
        .map_err(|e| MarqueeError::MalformedResponse(format!("{}: {}", reference.name(), e)))?;

    if !envelope.errors.is_empty() {
        let message = envelope
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        tracing::warn!("{} returned errors: {}", reference.name(), message);
        return Err(MarqueeError::Backend {
            operation: reference.name().to_string(),
            message,
        });
    }

    let data = envelope.data.ok_or_else(|| {
        MarqueeError::MalformedResponse(format!("{} response has no data", reference.name()))
    })?;

    let data: D = serde_json::from_value(data)
        .map_err(|e| MarqueeError::MalformedResponse(format!("{}: {}", reference.name(), e)))?;

    Ok(OperationResult {
        data,
        source: DataSource::Server,
        operation_name: reference.name(),
    })
}

fn status_error(operation: &str, status: StatusCode, body: &str) -> MarqueeError {
    let detail = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .ok()
        .filter(|m| !m.is_empty());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => MarqueeError::Unauthorized(
            detail.unwrap_or_else(|| format!("{} was not authorized", operation)),
        ),
        status => MarqueeError::Backend {
            operation: operation.to_string(),
            message: detail.unwrap_or_else(|| format!("request failed with status {}", status)),
        },
    }
}
