use std::fmt::Debug;

use actix_web::http::StatusCode;

use crate::domain::Alias;
use crate::domain::EntryEmail;
use crate::domain::ValidationError;
use crate::domain::WaitlistEntry;
use crate::utils::error_chain_fmt;
use crate::waitlist_store::InsertError;
use crate::waitlist_store::WaitlistStore;

/// Which form a submission comes from. Both run the same flow; they differ
/// only in how the alias is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// The hero form on the landing page
    PageShell,
    /// The dialog opened for an alias chosen upstream
    Overlay,
}

impl Surface {
    // NOTE: only the overlay lowercases. The page shell stores the alias as
    // typed, so `John` and `john` can both end up on the list.
    fn normalize(
        self,
        alias: Alias,
    ) -> Alias {
        match self {
            Surface::PageShell => alias,
            Surface::Overlay => alias.to_lowercase(),
        }
    }
}

/// Every way a submission can fail. `Display` is the message rendered under
/// the form; every variant leaves the form re-submittable.
#[derive(thiserror::Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("That alias is already taken")]
    AliasTaken(#[source] InsertError),
    #[error("You are already on the list")]
    AlreadyListed(#[source] InsertError),
    #[error("Something went wrong. Please try again.")]
    Datastore(#[source] InsertError),
    #[error("An unexpected error occurred. Please try again.")]
    Unexpected(#[source] InsertError),
}

impl Debug for SubmissionError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<InsertError> for SubmissionError {
    fn from(e: InsertError) -> Self {
        match &e {
            InsertError::UniqueViolation(msg) => {
                let msg = msg.to_lowercase();
                // an unattributable clash is reported against the alias
                match (msg.contains("alias"), msg.contains("email")) {
                    (false, true) => Self::AlreadyListed(e),
                    _ => Self::AliasTaken(e),
                }
            }
            InsertError::Rejected(_) => Self::Datastore(e),
            InsertError::Transport(_) => Self::Unexpected(e),
        }
    }
}

impl SubmissionError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::AliasTaken(_) | Self::AlreadyListed(_) => StatusCode::CONFLICT,
            Self::Datastore(_) | Self::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Validation order is fixed, first failure wins: alias present, alias
/// charset, email present, email shape.
pub fn parse_entry(
    alias: String,
    email: String,
) -> Result<WaitlistEntry, ValidationError> {
    let alias = Alias::parse(alias)?;
    let email = EntryEmail::parse(email)?;
    Ok(WaitlistEntry { alias, email })
}

/// What a form shows after a submission. The in-flight state lives in the
/// page: forms marked `data-busy-label` disable their submit buttons until
/// the response replaces the page.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FlowState {
    pub email: String,
    pub error: Option<String>,
    pub success: bool,
}

/// One form's submission state machine: idle -> (error | success).
pub struct SubmissionFlow {
    surface: Surface,
    state: FlowState,
}

impl SubmissionFlow {
    pub fn new(surface: Surface) -> Self {
        Self {
            surface,
            state: FlowState::default(),
        }
    }

    pub fn state(&self) -> &FlowState { &self.state }

    /// Validate, then insert. Invalid input never reaches `store`.
    #[tracing::instrument(
        name = "Submitting waitlist entry",
        skip(self, store, alias, email),
        fields(
            surface = ?self.surface,
            alias = %alias,
            email = %email,
        )
    )]
    pub async fn submit(
        &mut self,
        store: &WaitlistStore,
        alias: String,
        email: String,
    ) -> Result<WaitlistEntry, SubmissionError> {
        self.state.error = None;
        self.state.success = false;
        self.state.email = email.clone();

        let outcome = attempt(self.surface, store, alias, email).await;

        match &outcome {
            Ok(_) => self.state.success = true,
            Err(e) => {
                match e {
                    SubmissionError::Validation(_) => tracing::info!("rejected: {e}"),
                    _ => tracing::error!(
                        error.cause_chain = ?e,
                        error.message = %e,
                        "waitlist insert failed"
                    ),
                }
                self.state.error = Some(e.to_string());
            }
        }
        outcome
    }

    /// Unconditional reset, whatever state the form was in.
    pub fn close(&mut self) { self.state = FlowState::default(); }
}

async fn attempt(
    surface: Surface,
    store: &WaitlistStore,
    alias: String,
    email: String,
) -> Result<WaitlistEntry, SubmissionError> {
    let mut entry = parse_entry(alias, email)?;
    entry.alias = surface.normalize(entry.alias);
    store.insert(&entry).await?;
    Ok(entry)
}
