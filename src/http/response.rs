//! Response construction.
//!
//! # Responsibilities
//! - Validate the selected destination before redirecting
//! - Build the redirect response
//! - Map errors to plain-text diagnostics
//!
//! # Design Decisions
//! - 302 Found, matching what browsers and download tools follow for GET
//! - Failures never carry a Location header
//! - Database failures are 503, a bad destination is 500

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use url::Url;

use crate::error::RedirectError;

/// Check that `url` is an absolute URL with a host.
pub fn validate_destination(url: &str) -> Result<Url, RedirectError> {
    let invalid = |reason: String| RedirectError::InvalidDestinationUrl {
        url: url.to_string(),
        reason,
    };

    let parsed = Url::parse(url).map_err(|e| invalid(e.to_string()))?;
    if !parsed.has_host() {
        return Err(invalid("URL has no host".to_string()));
    }
    Ok(parsed)
}

/// `302 Found` pointing at `url`.
pub fn redirect(url: &Url) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, url.as_str())]).into_response()
}

impl RedirectError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RedirectError::Lookup(_) => StatusCode::SERVICE_UNAVAILABLE,
            RedirectError::InvalidDestinationUrl { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RedirectError {
    fn into_response(self) -> Response {
        (self.status_code(), format!("error: {}", self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LookupError;

    #[test]
    fn test_validate_destination() {
        let url = validate_destination("https://gh.dpik.top/https://github.com/i320442/tv/blob/main/tjcu.txt").unwrap();
        assert_eq!(url.host_str(), Some("gh.dpik.top"));

        for bad in ["", "iptv.txt", "/iptv.txt", "https://", "mailto:ops@example.com", "http//missing-colon"] {
            assert!(
                matches!(validate_destination(bad), Err(RedirectError::InvalidDestinationUrl { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_redirect_response() {
        let url = Url::parse("https://example.com/a.txt").unwrap();
        let response = redirect(&url);
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "https://example.com/a.txt");
    }

    #[test]
    fn test_error_responses() {
        let err = RedirectError::from(LookupError::unavailable("ipdata.txt", std::io::Error::other("gone")));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(response.headers().get(header::LOCATION).is_none());

        let response = validate_destination("nope").unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
    }
}
