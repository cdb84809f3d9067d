//! Per-client navigation state
//!
//! A [`Session`] holds the page a client is looking at and who they are
//! signed in as. All mutation goes through the transition methods below;
//! the fields are private so no handler can set `CheckDisease` directly.
//! [`Session::goto`] only accepts [`OpenPage`], which has no
//! `CheckDisease` variant, so the authentication guard in
//! [`Session::request_check_disease`] is the single way in.
//!
//! Every transition discards a pending upload. Staged uploads therefore
//! never outlive the Check Disease visit they were made on.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

use crate::classify::StagedUpload;

mod registry;

pub use registry::{SessionHandle, SessionRegistry};

/// Every page the client can be on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    Home,
    SignUp,
    LogIn,
    CheckDisease,
    KnowAboutDiseases,
}

impl Page {
    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::SignUp => "Sign Up",
            Page::LogIn => "Log In",
            Page::CheckDisease => "Check Disease",
            Page::KnowAboutDiseases => "Know About Diseases",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::SignUp => "sign-up",
            Page::LogIn => "log-in",
            Page::CheckDisease => "check-disease",
            Page::KnowAboutDiseases => "know-about-diseases",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Pages reachable without any precondition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpenPage {
    Home,
    SignUp,
    LogIn,
    KnowAboutDiseases,
}

impl From<OpenPage> for Page {
    fn from(page: OpenPage) -> Self {
        match page {
            OpenPage::Home => Page::Home,
            OpenPage::SignUp => Page::SignUp,
            OpenPage::LogIn => Page::LogIn,
            OpenPage::KnowAboutDiseases => Page::KnowAboutDiseases,
        }
    }
}

/// A navigation request as named in a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    Open(OpenPage),
    CheckDisease,
}

impl FromStr for NavTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "home" => Ok(NavTarget::Open(OpenPage::Home)),
            "sign-up" => Ok(NavTarget::Open(OpenPage::SignUp)),
            "log-in" => Ok(NavTarget::Open(OpenPage::LogIn)),
            "know-about-diseases" => Ok(NavTarget::Open(OpenPage::KnowAboutDiseases)),
            "check-disease" => Ok(NavTarget::CheckDisease),
            other => Err(format!("Unknown page: {}", other)),
        }
    }
}

/// Refused navigation or page action
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum NavigationError {
    /// Disease checking requested without a signed-in user
    #[error("You need to sign up or log in to check diseases.")]
    GuardViolation,

    /// A Check Disease action arrived while another page is shown
    #[error("Open the Check Disease page first.")]
    NotOnCheckDisease,
}

/// Navigation state of one client
#[derive(Debug, Default, PartialEq)]
pub struct Session {
    current_page: Page,
    identity: Option<String>,
    pending_upload: Option<StagedUpload>,
}

impl Session {
    /// Fresh session: Home, nobody signed in
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_page(&self) -> Page {
        self.current_page
    }

    /// Display name of the signed-in user
    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub fn pending_upload(&self) -> Option<&StagedUpload> {
        self.pending_upload.as_ref()
    }

    /// Unconditional transition to a page without preconditions
    pub fn goto(&mut self, target: OpenPage) {
        self.enter(target.into());
    }

    /// Guarded transition to Check Disease
    ///
    /// Refused with [`NavigationError::GuardViolation`] while nobody is
    /// signed in; the session is left untouched in that case.
    pub fn request_check_disease(&mut self) -> Result<(), NavigationError> {
        if !self.is_authenticated() {
            debug!(page = %self.current_page, "Check Disease refused: not authenticated");
            return Err(NavigationError::GuardViolation);
        }
        self.enter(Page::CheckDisease);
        Ok(())
    }

    /// Record a successful credential check and return Home
    pub fn authenticate(&mut self, identity: impl Into<String>) {
        self.identity = Some(identity.into());
        self.enter(Page::Home);
    }

    pub fn sign_out(&mut self) {
        self.identity = None;
        self.enter(Page::Home);
    }

    /// Ensure Check Disease actions (upload, predict) are allowed now
    pub fn require_check_disease(&self) -> Result<(), NavigationError> {
        if !self.is_authenticated() {
            Err(NavigationError::GuardViolation)
        } else if self.current_page != Page::CheckDisease {
            Err(NavigationError::NotOnCheckDisease)
        } else {
            Ok(())
        }
    }

    /// Hold a staged upload until prediction; replaces (and deletes) any
    /// previous one
    pub fn stage_upload(&mut self, upload: StagedUpload) -> Result<(), NavigationError> {
        self.require_check_disease()?;
        self.pending_upload = Some(upload);
        Ok(())
    }

    /// Hand the pending upload to exactly one classification attempt
    pub fn take_upload(&mut self) -> Result<Option<StagedUpload>, NavigationError> {
        self.require_check_disease()?;
        Ok(self.pending_upload.take())
    }

    fn enter(&mut self, page: Page) {
        debug!(from = %self.current_page, to = %page, "Page transition");
        self.current_page = page;
        self.pending_upload = None;
    }
}
