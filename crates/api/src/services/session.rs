//! Signed client-side sessions.
//!
//! The session lives entirely in the `session-id` cookie; the server keeps no
//! session table. A token is
//!
//! ```text
//! base64url(json claims) "." base64url(HMAC-SHA256(secret, first part))
//! ```
//!
//! and the claims carry the user ID plus issue and expiry timestamps. Reading
//! a session is fail-closed: a missing, malformed, tampered or expired token
//! is simply "no session".

use axum::http::{HeaderMap, HeaderValue, header};
use axum::response::{IntoResponseParts, ResponseParts};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use cookie::{Cookie, SameSite};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use pachara_core::UserId;

use crate::error::AppError;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "session-id";

type HmacSha256 = Hmac<Sha256>;

/// Claims carried inside a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Logged-in user.
    pub uid: UserId,
    /// Issued at (unix seconds).
    pub iat: i64,
    /// Expires at (unix seconds).
    pub exp: i64,
}

/// Issues, reads and invalidates session cookies.
///
/// Built once at startup from the configured secret; cheap to share behind
/// `AppState`.
#[derive(Clone)]
pub struct SessionSigner {
    secret: SecretString,
    ttl_seconds: i64,
    secure: bool,
}

impl std::fmt::Debug for SessionSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSigner")
            .field("secret", &"[REDACTED]")
            .field("ttl_seconds", &self.ttl_seconds)
            .field("secure", &self.secure)
            .finish()
    }
}

impl SessionSigner {
    /// Create a signer.
    ///
    /// * `secret` - HMAC key material
    /// * `ttl_seconds` - lifetime written into each token's `exp`
    /// * `secure` - whether cookies get the `Secure` attribute
    #[must_use]
    pub const fn new(secret: SecretString, ttl_seconds: i64, secure: bool) -> Self {
        Self {
            secret,
            ttl_seconds,
            secure,
        }
    }

    /// Start a session for `user_id`.
    ///
    /// The cookie has no `Max-Age`, so the browser drops it when it closes;
    /// the token's own `exp` bounds it server-side.
    #[must_use]
    pub fn issue(&self, user_id: UserId) -> SessionCookie {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            uid: user_id,
            iat: now,
            exp: now.saturating_add(self.ttl_seconds),
        };

        SessionCookie(self.cookie(self.encode(&claims)))
    }

    /// Read the user ID from the request's session cookie, if it is valid.
    #[must_use]
    pub fn read(&self, headers: &HeaderMap) -> Option<UserId> {
        let token = session_token(headers)?;
        let claims = self.decode(&token)?;

        if claims.exp <= Utc::now().timestamp() {
            tracing::debug!(user_id = %claims.uid, "Session token expired");
            return None;
        }

        Some(claims.uid)
    }

    /// A cookie that makes the browser delete the session immediately.
    ///
    /// Works whether or not the request carried a session.
    #[must_use]
    pub fn invalidate(&self) -> SessionCookie {
        let mut cookie = self.cookie(String::new());
        cookie.make_removal();
        SessionCookie(cookie)
    }

    /// Sign claims into a token string.
    #[must_use]
    pub fn encode(&self, claims: &SessionClaims) -> String {
        // Serializing three integers cannot fail
        let json = serde_json::to_vec(claims).unwrap_or_default();
        let payload = URL_SAFE_NO_PAD.encode(json);
        let signature = URL_SAFE_NO_PAD.encode(self.mac(payload.as_bytes()).finalize().into_bytes());
        format!("{payload}.{signature}")
    }

    /// Verify a token's signature and decode its claims.
    ///
    /// Expiry is not checked here; see [`Self::read`].
    #[must_use]
    pub fn decode(&self, token: &str) -> Option<SessionClaims> {
        let (payload, signature) = token.split_once('.')?;
        let signature = URL_SAFE_NO_PAD.decode(signature).ok()?;

        // Constant-time comparison
        if self.mac(payload.as_bytes()).verify_slice(&signature).is_err() {
            tracing::debug!("Session token signature mismatch");
            return None;
        }

        let json = URL_SAFE_NO_PAD.decode(payload).ok()?;
        serde_json::from_slice(&json).ok()
    }

    fn mac(&self, message: &[u8]) -> HmacSha256 {
        // HMAC accepts keys of any length
        let mut mac = <HmacSha256 as Mac>::new_from_slice(self.secret.expose_secret().as_bytes())
            .unwrap_or_else(|_| unreachable!("HMAC-SHA256 accepts any key length"));
        mac.update(message);
        mac
    }

    fn cookie(&self, value: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE_NAME, value))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .build()
    }
}

/// Find the session token among the request's cookies.
fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|c| c.name() == SESSION_COOKIE_NAME)
        .map(|c| c.value().to_owned())
}

/// A `Set-Cookie` for the session, usable as a response part.
///
/// ```rust,ignore
/// Ok((state.sessions().issue(user_id), Json(body)))
/// ```
#[derive(Debug, Clone)]
pub struct SessionCookie(Cookie<'static>);

impl SessionCookie {
    /// The cookie that will be sent.
    #[must_use]
    pub const fn cookie(&self) -> &Cookie<'static> {
        &self.0
    }
}

impl IntoResponseParts for SessionCookie {
    type Error = AppError;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        let value = HeaderValue::try_from(self.0.to_string())
            .map_err(|e| AppError::Internal(format!("invalid session cookie: {e}")))?;
        res.headers_mut().append(header::SET_COOKIE, value);
        Ok(res)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SECRET: &str = "Zr7Kq2mW9xT4vB6nP1sD8fH3jL5cG0yA";

    fn signer() -> SessionSigner {
        SessionSigner::new(SecretString::from(SECRET), 3600, false)
    }

    fn request_with_cookie(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    fn as_request(cookie: &SessionCookie) -> HeaderMap {
        let c = cookie.cookie();
        request_with_cookie(&format!("{}={}", c.name(), c.value()))
    }

    #[test]
    fn test_issued_session_reads_back_user() {
        let signer = signer();
        let cookie = signer.issue(UserId::new(42));

        assert_eq!(signer.read(&as_request(&cookie)), Some(UserId::new(42)));
    }

    #[test]
    fn test_issued_cookie_attributes() {
        let cookie = signer().issue(UserId::new(1));
        let c = cookie.cookie();

        assert_eq!(c.name(), SESSION_COOKIE_NAME);
        assert_eq!(c.path(), Some("/"));
        assert_eq!(c.http_only(), Some(true));
        assert_eq!(c.same_site(), Some(SameSite::Lax));
        // Browser-session cookie
        assert!(c.max_age().is_none());
    }

    #[test]
    fn test_secure_flag_follows_signer() {
        let signer = SessionSigner::new(SecretString::from(SECRET), 3600, true);
        assert_eq!(signer.issue(UserId::new(1)).cookie().secure(), Some(true));
    }

    #[test]
    fn test_session_found_among_other_cookies() {
        let signer = signer();
        let token = signer.issue(UserId::new(7)).cookie().value().to_owned();
        let headers = request_with_cookie(&format!("theme=dark; session-id={token}; lang=th"));

        assert_eq!(signer.read(&headers), Some(UserId::new(7)));
    }

    #[test]
    fn test_missing_cookie_is_no_session() {
        assert_eq!(signer().read(&HeaderMap::new()), None);
        assert_eq!(signer().read(&request_with_cookie("theme=dark")), None);
    }

    #[test]
    fn test_invalidated_cookie_is_no_session() {
        let signer = signer();
        let removal = signer.invalidate();
        let c = removal.cookie();

        assert_eq!(c.value(), "");
        assert_eq!(c.max_age(), Some(cookie::time::Duration::ZERO));
        assert_eq!(signer.read(&as_request(&removal)), None);
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let signer = signer();
        let token = signer.issue(UserId::new(1)).cookie().value().to_owned();
        let (_, signature) = token.split_once('.').unwrap();

        // Same signature, claims rewritten to another user
        let forged_claims = SessionClaims {
            uid: UserId::new(2),
            iat: 0,
            exp: i64::MAX,
        };
        let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged_claims).unwrap());
        let forged = format!("{forged_payload}.{signature}");

        assert_eq!(signer.decode(&forged), None);
        assert_eq!(
            signer.read(&request_with_cookie(&format!("session-id={forged}"))),
            None
        );
    }

    #[test]
    fn test_token_from_other_key_is_rejected() {
        let other = SessionSigner::new(
            SecretString::from("Xm3Pq8Rt1Vw6Yz0Bc4Df7Gh2Jk5Ln9Sa"),
            3600,
            false,
        );
        let cookie = other.issue(UserId::new(1));

        assert_eq!(signer().read(&as_request(&cookie)), None);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let signer = signer();
        let now = Utc::now().timestamp();
        let token = signer.encode(&SessionClaims {
            uid: UserId::new(3),
            iat: now - 7200,
            exp: now - 3600,
        });

        // Signature is valid, so decode succeeds...
        assert!(signer.decode(&token).is_some());
        // ...but the session is over
        assert_eq!(
            signer.read(&request_with_cookie(&format!("session-id={token}"))),
            None
        );
    }

    #[test]
    fn test_garbage_tokens_are_rejected() {
        let signer = signer();
        for token in ["", ".", "abc", "abc.def", "!!!.???", "a.b.c"] {
            assert_eq!(signer.decode(token), None, "token {token:?}");
        }
    }

    #[test]
    fn test_claims_round_trip_through_encode() {
        let signer = signer();
        let claims = SessionClaims {
            uid: UserId::new(9),
            iat: 100,
            exp: 200,
        };
        assert_eq!(signer.decode(&signer.encode(&claims)), Some(claims));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let output = format!("{:?}", signer());
        assert!(!output.contains(SECRET));
    }
}
