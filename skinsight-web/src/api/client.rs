//! Client session cookie handling
//!
//! The cookie carries only an opaque id. Ids the registry does not know are
//! replaced, never adopted, so a client cannot pick its own session.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, HeaderValue},
    response::{Html, IntoResponse, Response},
};
use std::convert::Infallible;
use tracing::warn;
use uuid::Uuid;

use crate::session::SessionHandle;
use crate::AppState;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "skinsight_session";

/// The requesting client's session, created on first contact
pub struct ClientSession(pub SessionHandle);

#[axum::async_trait]
impl FromRequestParts<AppState> for ClientSession {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let presented = session_id_from_headers(&parts.headers);
        Ok(ClientSession(state.sessions.acquire(presented).await))
    }
}

/// Session id from the `Cookie` header(s), if present and well formed
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

/// A rendered page, introducing the session cookie when the session is new
pub struct PageResponse {
    html: String,
    new_session: Option<Uuid>,
}

impl PageResponse {
    pub fn new(handle: &SessionHandle, html: String) -> Self {
        Self {
            html,
            new_session: handle.is_new.then_some(handle.id),
        }
    }
}

impl IntoResponse for PageResponse {
    fn into_response(self) -> Response {
        let mut response = Html(self.html).into_response();

        if let Some(id) = self.new_session {
            let cookie = format!("{}={}; HttpOnly; SameSite=Lax; Path=/", SESSION_COOKIE, id);
            match HeaderValue::from_str(&cookie) {
                Ok(value) => {
                    response.headers_mut().insert(header::SET_COOKIE, value);
                }
                Err(e) => warn!("Cannot encode session cookie: {}", e),
            }
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_parsing() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=dark; {}={}; other=1", SESSION_COOKIE, id)).unwrap(),
        );
        assert_eq!(session_id_from_headers(&headers), Some(id));
    }

    #[test]
    fn test_malformed_or_missing_cookie() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_id_from_headers(&headers), None);

        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("skinsight_session=not-a-uuid"),
        );
        assert_eq!(session_id_from_headers(&headers), None);

        headers.insert(header::COOKIE, HeaderValue::from_static("skinsight_sessionx=1"));
        assert_eq!(session_id_from_headers(&headers), None);
    }
}
