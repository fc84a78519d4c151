//! OAuth2 client-credentials request shared by the concrete credentials.

use crate::{
    credential::AccessToken,
    error::{IdentityError, IdentityResult},
    secrets::TokenResponse,
};
use chrono::{DateTime, Utc};
use reqwest::Client;
use tracing::{debug, warn};

/// `client_assertion_type` for a JWT bearer assertion (RFC 7523).
pub const JWT_BEARER_ASSERTION_TYPE: &str = "urn:ietf:params:oauth:client-assertion-type:jwt-bearer";

/// POST `form` to `endpoint` and turn the response into an [`AccessToken`].
///
/// An `error` field in the body wins over the HTTP status.
pub(crate) async fn request_token(
    http: &Client,
    endpoint: &str,
    form: &[(&str, &str)],
) -> IdentityResult<AccessToken> {
    debug!(endpoint, "Requesting token");

    let response = http.post(endpoint).form(form).send().await?;
    let status = response.status();
    let body = response.text().await?;

    match serde_json::from_str::<TokenResponse>(&body) {
        Ok(TokenResponse {
            error: Some(error),
            error_description,
            ..
        }) => {
            warn!(endpoint, status = status.as_u16(), %error, "Token exchange rejected");
            Err(IdentityError::token_exchange(
                error,
                error_description.unwrap_or_default(),
            ))
        }
        Ok(TokenResponse {
            access_token: Some(token),
            expires_in,
            ..
        }) if status.is_success() => {
            let expires_in = expires_in
                .ok_or_else(|| {
                    IdentityError::token_exchange("invalid_response", "missing expires_in")
                })?
                .seconds()?;
            let expires_on = expiry_from(Utc::now(), expires_in)?;
            debug!(endpoint, %expires_on, "Token exchange succeeded");
            Ok(AccessToken::new(token, expires_on))
        }
        _ => Err(IdentityError::Unexpected {
            status: status.as_u16(),
            body,
        }),
    }
}

/// `now + expires_in`, truncated to whole seconds.
pub(crate) fn expiry_from(now: DateTime<Utc>, expires_in: i64) -> IdentityResult<DateTime<Utc>> {
    now.timestamp()
        .checked_add(expires_in)
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .ok_or_else(|| {
            IdentityError::token_exchange(
                "invalid_response",
                format!("expires_in {expires_in} is out of range"),
            )
        })
}
