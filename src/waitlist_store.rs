use std::fmt::Debug;

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::configuration::DatastoreBackend;
use crate::configuration::Settings;
use crate::domain::WaitlistEntry;
use crate::rest_client::RestClient;
use crate::startup::get_connection_pool;
use crate::utils::error_chain_fmt;

/// SQLSTATE for `unique_violation`
pub const UNIQUE_VIOLATION: &str = "23505";

/// Why the datastore did not take an entry.
///
/// Uniqueness is the datastore's business: we only learn about a clash from
/// the error it sends back, and the message is all there is to tell an alias
/// clash from an email clash.
#[derive(thiserror::Error)]
pub enum InsertError {
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
    #[error("datastore rejected the insert")]
    Rejected(#[source] anyhow::Error),
    #[error("could not reach the datastore")]
    Transport(#[source] anyhow::Error),
}

impl Debug for InsertError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<sqlx::Error> for InsertError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                // the constraint name (`waitlist_alias_key`) is what carries the column
                let message = match db_err.constraint() {
                    Some(constraint) => format!("{} ({constraint})", db_err.message()),
                    None => db_err.message().to_string(),
                };
                return Self::UniqueViolation(message);
            }
        }
        match e {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed => Self::Transport(e.into()),
            _ => Self::Rejected(e.into()),
        }
    }
}

/// The external collaborator that persists waitlist entries. Which one is
/// used is decided once, at startup, by `datastore.backend`.
pub enum WaitlistStore {
    Postgres(PgPool),
    Rest(RestClient),
}

impl WaitlistStore {
    pub fn from_settings(cfg: &Settings) -> Self {
        match cfg.datastore.backend {
            DatastoreBackend::Postgres => Self::Postgres(get_connection_pool(&cfg.database)),
            DatastoreBackend::Rest => Self::Rest(cfg.datastore.rest_client()),
        }
    }

    #[tracing::instrument(
        name = "Inserting waitlist entry",
        skip(self, entry),
        fields(
            alias = %entry.alias.as_ref(),
            email = %entry.email.as_ref(),
        )
    )]
    pub async fn insert(
        &self,
        entry: &WaitlistEntry,
    ) -> Result<(), InsertError> {
        match self {
            Self::Postgres(pool) => insert_entry(pool, entry).await,
            Self::Rest(client) => client.insert(entry).await,
        }
    }
}

/// Runtime-checked query; `query!` would need a live db (or `.sqlx`) at
/// compile time.
async fn insert_entry(
    pool: &PgPool,
    entry: &WaitlistEntry,
) -> Result<(), InsertError> {
    sqlx::query(
        "
    INSERT INTO waitlist (id, alias, email, created_at)
    VALUES ($1, $2, $3, $4)
",
    )
    .bind(Uuid::new_v4())
    .bind(entry.alias.as_ref())
    .bind(entry.email.as_ref())
    .bind(Utc::now())
    // `Executor` is implemented for `&PgPool`; a connection is borrowed for
    // the duration of the query
    .execute(pool)
    .await?;
    Ok(())
}
