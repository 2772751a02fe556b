//! Shared HTTP plumbing for provider clients

use consult_application::ProviderError;
use consult_domain::ProviderId;
use serde::Serialize;
use tracing::debug;

/// Characters of a response body kept in logs and status errors
const PREVIEW_CHARS: usize = 200;

/// POST `body` as JSON and return the raw response text.
///
/// Non-2xx statuses become [`ProviderError::Status`] carrying a body preview.
pub(crate) async fn post_json<T: Serialize + ?Sized>(
    provider: &ProviderId,
    request: reqwest::RequestBuilder,
    body: &T,
) -> Result<String, ProviderError> {
    let response = request
        .json(body)
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout
            } else {
                ProviderError::Connection(e.to_string())
            }
        })?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ProviderError::Connection(format!("Failed to read response body: {}", e)))?;

    debug!("{} response ({}): {}", provider, status.as_u16(), preview(&text));

    if !status.is_success() {
        return Err(ProviderError::Status {
            status: status.as_u16(),
            body: preview(&text),
        });
    }

    Ok(text)
}

/// Decode a JSON body into `T`, reporting schema mismatches as malformed.
pub(crate) fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ProviderError> {
    serde_json::from_str(body).map_err(|e| ProviderError::MalformedResponse(e.to_string()))
}

/// First [`PREVIEW_CHARS`] characters of `text`, with an ellipsis when cut.
pub(crate) fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
