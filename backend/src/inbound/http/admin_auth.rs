//! HTTP Basic authentication for the admin surface.
//!
//! Enforcement is decided once at startup: credentials must be configured
//! and the deployment must be production (or enforcement forced). Handlers
//! opt in by taking an [`AdminAccess`] argument.

use std::sync::Arc;

use actix_web::dev::Payload;
use actix_web::http::StatusCode;
use actix_web::http::header::{AUTHORIZATION, HeaderValue, WWW_AUTHENTICATE};
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, web};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use futures_util::future::{Ready, ready};
use serde_json::json;
use subtle::ConstantTimeEq;
use tracing::{error, warn};

use crate::domain::{Error, REQUEST_ID_HEADER};

use super::state::HttpState;

#[derive(Clone, PartialEq, Eq)]
struct Credentials {
    user: String,
    password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

impl Credentials {
    /// Constant-time comparison; both fields are always compared.
    fn matches(&self, user: &str, password: &str) -> bool {
        let user_ok = user.as_bytes().ct_eq(self.user.as_bytes());
        let password_ok = password.as_bytes().ct_eq(self.password.as_bytes());
        (user_ok & password_ok).into()
    }
}

/// Admin authentication policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminAuth {
    credentials: Option<Arc<Credentials>>,
    realm: String,
}

impl AdminAuth {
    /// No authentication; every admin request is let through.
    pub fn disabled() -> Self {
        Self {
            credentials: None,
            realm: String::new(),
        }
    }

    /// Require `user`/`password` on every admin request.
    pub fn required(
        user: impl Into<String>,
        password: impl Into<String>,
        realm: impl Into<String>,
    ) -> Self {
        Self {
            credentials: Some(Arc::new(Credentials {
                user: user.into(),
                password: password.into(),
            })),
            realm: realm.into(),
        }
    }

    /// Enforce only when both credentials are non-empty and the
    /// deployment is production or enforcement is forced.
    pub fn from_deployment(
        user: &str,
        password: &str,
        realm: &str,
        production: bool,
        force: bool,
    ) -> Self {
        if user.is_empty() || password.is_empty() || !(production || force) {
            return Self::disabled();
        }
        Self::required(user, password, realm)
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.credentials.is_some()
    }

    fn challenge(&self, message: &str) -> AdminAuthError {
        AdminAuthError::Challenge {
            realm: self.realm.clone(),
            error: Error::unauthorized(message).with_details(json!({ "code": "unauthorized" })),
        }
    }

    fn check(&self, header: Option<&HeaderValue>) -> Result<(), AdminAuthError> {
        let Some(expected) = self.credentials.as_deref() else {
            return Ok(());
        };
        let Some((user, password)) = header.and_then(decode_basic) else {
            return Err(self.challenge("authentication required"));
        };
        if !expected.matches(&user, &password) {
            warn!(user = %user, "admin credentials rejected");
            return Err(self.challenge("invalid credentials"));
        }
        Ok(())
    }
}

/// `Basic <base64(user:password)>`; a missing colon yields an empty
/// password.
fn decode_basic(header: &HeaderValue) -> Option<(String, String)> {
    let (scheme, encoded) = header.to_str().ok()?.split_once(' ')?;
    if scheme != "Basic" || encoded.is_empty() {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8_lossy(&decoded);
    Some(match decoded.split_once(':') {
        Some((user, password)) => (user.to_owned(), password.to_owned()),
        None => (decoded.into_owned(), String::new()),
    })
}

/// Rejections raised by the [`AdminAccess`] extractor.
#[derive(Debug, thiserror::Error)]
pub enum AdminAuthError {
    #[error("{error}")]
    Challenge { realm: String, error: Error },
    #[error("{0}")]
    Misconfigured(Error),
}

impl ResponseError for AdminAuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Challenge { .. } => StatusCode::UNAUTHORIZED,
            Self::Misconfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::Challenge { realm, error } => {
                let mut builder = HttpResponse::Unauthorized();
                builder.insert_header((
                    WWW_AUTHENTICATE,
                    format!("Basic realm=\"{realm}\", charset=\"UTF-8\""),
                ));
                if let Some(id) = error.request_id() {
                    builder.insert_header((REQUEST_ID_HEADER, id.to_owned()));
                }
                builder.json(error)
            }
            Self::Misconfigured(error) => error.error_response(),
        }
    }
}

/// Proof that the request passed admin authentication.
#[derive(Debug, Clone, Copy)]
pub struct AdminAccess;

impl FromRequest for AdminAccess {
    type Error = AdminAuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<HttpState>>() else {
            error!("admin route mounted without HTTP state");
            return ready(Err(AdminAuthError::Misconfigured(Error::internal(
                "admin authentication is not configured",
            ))));
        };
        ready(
            state
                .admin_auth
                .check(req.headers().get(AUTHORIZATION))
                .map(|()| AdminAccess),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn basic(user: &str, password: &str) -> HeaderValue {
        let encoded = STANDARD.encode(format!("{user}:{password}"));
        HeaderValue::from_str(&format!("Basic {encoded}")).expect("header value")
    }

    #[rstest]
    #[case("", "secret", true, false)]
    #[case("admin", "", true, false)]
    #[case("admin", "secret", false, false)]
    #[case("admin", "secret", true, true)]
    #[case("admin", "secret", false, true)]
    fn enforcement_follows_deployment(
        #[case] user: &str,
        #[case] password: &str,
        #[case] production: bool,
        #[case] force: bool,
    ) {
        let auth = AdminAuth::from_deployment(user, password, "Admin", production, force);
        let expected = !user.is_empty() && !password.is_empty() && (production || force);
        assert_eq!(auth.is_enabled(), expected);
    }

    #[rstest]
    fn disabled_auth_lets_everything_through() {
        assert!(AdminAuth::disabled().check(None).is_ok());
    }

    #[rstest]
    fn matching_credentials_pass() {
        let auth = AdminAuth::required("admin", "s3:cret", "Admin");
        assert!(auth.check(Some(&basic("admin", "s3:cret"))).is_ok());
    }

    #[rstest]
    #[case(None)]
    #[case(Some(HeaderValue::from_static("Bearer abc")))]
    #[case(Some(HeaderValue::from_static("Basic !!!not-base64")))]
    #[case(Some(HeaderValue::from_static("Basic")))]
    fn malformed_headers_are_challenged(#[case] header: Option<HeaderValue>) {
        let auth = AdminAuth::required("admin", "secret", "Admin");

        let err = auth.check(header.as_ref()).expect_err("challenge");

        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    fn wrong_password_is_challenged_with_realm() {
        let auth = AdminAuth::required("admin", "secret", "Reservas Admin");

        let err = auth
            .check(Some(&basic("admin", "nope")))
            .expect_err("challenge");
        let response = err.error_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response
                .headers()
                .get(WWW_AUTHENTICATE)
                .and_then(|v| v.to_str().ok()),
            Some("Basic realm=\"Reservas Admin\", charset=\"UTF-8\"")
        );
    }

    #[rstest]
    #[case("admin", "secret", true)]
    #[case("admin", "secre", false)]
    #[case("admin", "secret1", false)]
    #[case("admim", "secret", false)]
    #[case("", "", false)]
    fn credentials_compare_both_fields_exactly(
        #[case] user: &str,
        #[case] password: &str,
        #[case] expected: bool,
    ) {
        let credentials = Credentials {
            user: "admin".to_owned(),
            password: "secret".to_owned(),
        };

        assert_eq!(credentials.matches(user, password), expected);
    }

    #[rstest]
    fn user_without_colon_has_empty_password() {
        let encoded = STANDARD.encode("admin");
        let header = HeaderValue::from_str(&format!("Basic {encoded}")).expect("header");

        assert_eq!(
            decode_basic(&header),
            Some(("admin".to_owned(), String::new()))
        );
    }
}
