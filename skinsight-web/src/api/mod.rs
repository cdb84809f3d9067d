//! HTTP handlers for skinsight-web
//!
//! Every page action answers with the full page for the resulting session
//! state. The session lock is held from the transition through the render,
//! so the page always shows the state the action produced.

pub mod accounts;
pub mod buildinfo;
pub mod check_disease;
pub mod client;
pub mod health;
pub mod pages;

pub use accounts::{log_in, log_out, sign_up};
pub use buildinfo::get_build_info;
pub use check_disease::{predict, upload_image};
pub use client::{ClientSession, PageResponse, SESSION_COOKIE};
pub use health::health_routes;
pub use pages::{navigate, show_page};

use tracing::warn;

use crate::session::{Page, Session, SessionHandle};
use crate::ui::{self, PageView};

/// Render `session` into a response, adding the pending upload preview
pub(crate) async fn respond(handle: &SessionHandle, session: &Session, mut view: PageView) -> PageResponse {
    if session.current_page() == Page::CheckDisease && view.preview.is_none() {
        if let Some(upload) = session.pending_upload() {
            match upload.preview_data_uri().await {
                Ok(uri) => view.preview = Some(uri),
                Err(e) => warn!("Cannot read staged upload for preview: {}", e),
            }
        }
    }

    PageResponse::new(handle, ui::render(session, &view))
}
