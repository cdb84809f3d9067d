//! Server-rendered pages
//!
//! Every response is the full page for the session's current page. The
//! handlers decide the state; this module only turns state plus a
//! [`PageView`] into HTML.
//!
//! # Structure
//! - **Layout** (`layout`): document shell, escaping, nav buttons
//! - **Home** (`home`): landing page with sidebar account controls
//! - **Sign Up** / **Log In** (`sign_up`, `log_in`): account forms
//! - **Check Disease** (`check_disease`): upload, preview and results
//! - **Know About Diseases** (`know_about`): reference content

use crate::classify::ClassificationResult;
use crate::session::{Page, Session};

mod check_disease;
mod home;
mod know_about;
mod layout;
mod log_in;
mod sign_up;

/// One-shot message shown above the page content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    Success(String),
    Warning(String),
    Error(String),
}

impl Advisory {
    pub fn success(message: impl Into<String>) -> Self {
        Advisory::Success(message.into())
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Advisory::Warning(message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Advisory::Error(message.into())
    }

    pub fn message(&self) -> &str {
        match self {
            Advisory::Success(m) | Advisory::Warning(m) | Advisory::Error(m) => m,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Advisory::Success(_) => "success",
            Advisory::Warning(_) => "warning",
            Advisory::Error(_) => "error",
        }
    }
}

/// Form values echoed back after a rejected submission
///
/// Passwords are never echoed.
#[derive(Debug, Clone, Default)]
pub struct Prefill {
    pub name: String,
    pub email: String,
}

/// Transient data for a single render
#[derive(Debug, Clone, Default)]
pub struct PageView {
    pub advisory: Option<Advisory>,
    pub result: Option<ClassificationResult>,
    /// `data:` URI of the pending upload
    pub preview: Option<String>,
    /// `?disease=` slug on Know About Diseases
    pub selected_disease: Option<String>,
    pub prefill: Prefill,
}

impl PageView {
    pub fn with_advisory(advisory: Advisory) -> Self {
        Self {
            advisory: Some(advisory),
            ..Self::default()
        }
    }
}

/// Render the page `session` is currently on
pub fn render(session: &Session, view: &PageView) -> String {
    let page = session.current_page();
    let (sidebar, body) = match page {
        Page::Home => (home::sidebar(session.identity()), home::body()),
        Page::SignUp => (String::new(), sign_up::body(&view.prefill)),
        Page::LogIn => (String::new(), log_in::body(&view.prefill)),
        Page::CheckDisease => (
            String::new(),
            check_disease::body(view.preview.as_deref(), view.result.as_ref()),
        ),
        Page::KnowAboutDiseases => {
            let selected = crate::diseases::select(view.selected_disease.as_deref());
            (know_about::sidebar(selected), know_about::body(selected))
        }
    };

    layout::page_shell(page.title(), view.advisory.as_ref(), &sidebar, &body)
}
