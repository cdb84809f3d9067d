//! Sign Up, Log In and Log Out handlers

use axum::extract::{Form, State};

use super::{respond, ClientSession, PageResponse};
use crate::accounts::{LogInForm, SignUpForm};
use crate::session::{OpenPage, Page};
use crate::ui::{Advisory, PageView, Prefill};
use crate::AppState;

fn wrong_page(page: Page) -> Advisory {
    Advisory::warning(format!("Open the {} page first.", page.title()))
}

/// POST /sign-up
///
/// Success moves to Log In with the email prefilled. Any failure stays on
/// Sign Up and echoes name and email.
pub async fn sign_up(
    State(state): State<AppState>,
    ClientSession(handle): ClientSession,
    Form(form): Form<SignUpForm>,
) -> PageResponse {
    let mut session = handle.session.lock().await;
    if session.current_page() != Page::SignUp {
        return respond(&handle, &session, PageView::with_advisory(wrong_page(Page::SignUp))).await;
    }

    let view = match state.accounts.sign_up(&form).await {
        Ok(()) => {
            session.goto(OpenPage::LogIn);
            PageView {
                advisory: Some(Advisory::success("Account created successfully!")),
                prefill: Prefill {
                    email: form.email,
                    ..Prefill::default()
                },
                ..PageView::default()
            }
        }
        Err(e) => PageView {
            advisory: Some(Advisory::error(e.to_string())),
            prefill: Prefill {
                name: form.name,
                email: form.email,
            },
            ..PageView::default()
        },
    };

    respond(&handle, &session, view).await
}

/// POST /log-in
///
/// Success authenticates the session and lands on Home.
pub async fn log_in(
    State(state): State<AppState>,
    ClientSession(handle): ClientSession,
    Form(form): Form<LogInForm>,
) -> PageResponse {
    let mut session = handle.session.lock().await;
    if session.current_page() != Page::LogIn {
        return respond(&handle, &session, PageView::with_advisory(wrong_page(Page::LogIn))).await;
    }

    let view = match state.accounts.log_in(&form).await {
        Ok(name) => {
            session.authenticate(name);
            PageView::default()
        }
        Err(e) => PageView {
            advisory: Some(Advisory::error(e.to_string())),
            prefill: Prefill {
                email: form.email,
                ..Prefill::default()
            },
            ..PageView::default()
        },
    };

    respond(&handle, &session, view).await
}

/// POST /log-out
pub async fn log_out(ClientSession(handle): ClientSession) -> PageResponse {
    let mut session = handle.session.lock().await;
    session.sign_out();
    respond(&handle, &session, PageView::default()).await
}
