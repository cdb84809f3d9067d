//! Page display and navigation

use axum::extract::{FromRequestParts, Path, Query};
use axum::http::request::Parts;
use serde::Deserialize;

use super::{respond, ClientSession, PageResponse};
use crate::error::ApiError;
use crate::session::NavTarget;
use crate::ui::{Advisory, PageView};

/// Optional disease selection for Know About Diseases
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub disease: Option<String>,
}

/// Navigation target named in the request path
///
/// Resolved before [`ClientSession`], so an unknown page is refused without
/// creating a session.
pub struct NavPath(pub NavTarget);

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for NavPath {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(slug) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::NotFound(e.body_text()))?;
        slug.parse().map(NavPath).map_err(ApiError::NotFound)
    }
}

/// GET /
///
/// Render the current page without changing state.
pub async fn show_page(
    ClientSession(handle): ClientSession,
    Query(query): Query<PageQuery>,
) -> PageResponse {
    let session = handle.session.lock().await;
    let view = PageView {
        selected_disease: query.disease,
        ..PageView::default()
    };
    respond(&handle, &session, view).await
}

/// POST /nav/:page
///
/// Check Disease goes through the authentication guard; a refusal keeps
/// the current page and shows the guard advisory.
pub async fn navigate(
    NavPath(target): NavPath,
    ClientSession(handle): ClientSession,
    Query(query): Query<PageQuery>,
) -> PageResponse {
    let mut session = handle.session.lock().await;
    let mut view = PageView {
        selected_disease: query.disease,
        ..PageView::default()
    };

    match target {
        NavTarget::Open(page) => session.goto(page),
        NavTarget::CheckDisease => {
            if let Err(e) = session.request_check_disease() {
                view.advisory = Some(Advisory::warning(e.to_string()));
            }
        }
    }

    respond(&handle, &session, view).await
}
