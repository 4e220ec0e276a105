// HTTP client for the TeamViewer Web API device list.
//
// Endpoint: GET /api/v1/devices
// Auth: Authorization: Bearer <token>
//
// The body is returned untouched; decoding belongs to tvcheck-core.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Public TeamViewer device inventory endpoint.
pub const DEFAULT_DEVICES_URL: &str = "https://webapi.teamviewer.com/api/v1/devices";

/// Error body returned by the Web API on non-2xx responses.
#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

/// Async client for the device inventory endpoint.
pub struct InventoryClient {
    http: reqwest::Client,
    devices_url: Url,
}

impl InventoryClient {
    /// Build from a bearer token and transport config.
    ///
    /// Injects `Authorization: Bearer <key>` (marked sensitive) and
    /// `Content-Type: application/json` as default headers.
    pub fn from_api_key(
        devices_url: &str,
        api_key: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut auth_value =
            HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret())).map_err(|e| {
                Error::Authentication {
                    message: format!("invalid API key header value: {e}"),
                }
            })?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = transport.build_client_with_headers(headers)?;
        let devices_url = Url::parse(devices_url)?;

        Ok(Self { http, devices_url })
    }

    /// Fetch the raw device list body.
    ///
    /// Exactly one request is made; there is no retry.
    pub async fn fetch_devices(&self) -> Result<Vec<u8>, Error> {
        debug!("GET {}", self.devices_url);

        let resp = self.http.get(self.devices_url.clone()).send().await?;
        let status = resp.status();

        if status.is_success() {
            let body = resp.bytes().await?;
            debug!(bytes = body.len(), "received device list");
            return Ok(body.to_vec());
        }

        Err(Self::parse_error(status, resp).await)
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Error::InvalidApiKey;
        }

        let raw = resp.text().await.unwrap_or_default();

        if let Ok(err) = serde_json::from_str::<ErrorResponse>(&raw) {
            if err.error.is_some() || err.error_description.is_some() {
                return Error::Api {
                    status: status.as_u16(),
                    message: err
                        .error_description
                        .or_else(|| err.error.clone())
                        .unwrap_or_else(|| status.to_string()),
                    code: err.error,
                };
            }
        }

        Error::Api {
            status: status.as_u16(),
            message: if raw.is_empty() {
                status.to_string()
            } else {
                preview(&raw).to_owned()
            },
            code: None,
        }
    }
}

/// First 200 bytes of a body, cut on a char boundary.
fn preview(body: &str) -> &str {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_truncates_on_char_boundary() {
        let body = "é".repeat(150);
        let cut = preview(&body);
        assert!(cut.len() <= 200);
        assert!(cut.chars().all(|c| c == 'é'));
    }

    #[test]
    fn preview_keeps_short_bodies() {
        assert_eq!(preview("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn rejects_unparseable_url() {
        let result = InventoryClient::from_api_key(
            "not a url",
            &SecretString::from("k".to_string()),
            &TransportConfig::default(),
        );
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }
}
