use reqwest::Client;
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use secrecy::Secret;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::WaitlistEntry;
use crate::waitlist_store::InsertError;
use crate::waitlist_store::UNIQUE_VIOLATION;

/// Client for a hosted PostgREST endpoint (the shape Supabase exposes).
///
/// Rows are written with `POST {base_url}/rest/v1/{table}`; the server owns
/// the table and its unique constraints.
// `Client` keeps a connection pool internally, so one `RestClient` is built
// at startup and shared by all workers
#[derive(Clone)]
pub struct RestClient {
    http_client: Client,
    base_url: String,
    table: String,
    api_key: Secret<String>,
}

#[derive(Serialize)]
struct InsertRow<'a> {
    alias: &'a str,
    email: &'a str,
}

/// PostgREST error payload. Every field is optional: proxies in front of the
/// endpoint may answer with an empty or non-JSON body.
#[derive(Deserialize, Default, Debug)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
}

impl RestClient {
    pub fn new(
        base_url: String,
        table: String,
        api_key: Secret<String>,
    ) -> Self {
        Self {
            http_client: Client::new(),
            base_url,
            table,
            api_key,
        }
    }

    /// Insert a single row. Nothing is returned on success
    /// (`Prefer: return=minimal`). No request timeout is set: once sent, the
    /// insert runs until the datastore answers or the connection fails.
    pub async fn insert(
        &self,
        entry: &WaitlistEntry,
    ) -> Result<(), InsertError> {
        let url = format!("{}/rest/v1/{}", self.base_url, self.table);
        let rows = [InsertRow {
            alias: entry.alias.as_ref(),
            email: entry.email.as_ref(),
        }];

        let resp = self
            .http_client
            .post(&url)
            .header("apikey", self.api_key.expose_secret())
            .bearer_auth(self.api_key.expose_secret())
            .header("Prefer", "return=minimal")
            .json(&rows)
            .send()
            .await
            .map_err(|e| InsertError::Transport(e.into()))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        let body: ErrorBody = resp.json().await.unwrap_or_default();
        Err(rejection(status, body))
    }
}

fn rejection(
    status: StatusCode,
    body: ErrorBody,
) -> InsertError {
    if status == StatusCode::CONFLICT || body.code.as_deref() == Some(UNIQUE_VIOLATION) {
        // `details` echoes the submitted value, so only its column name is
        // ever used
        let message = body
            .message
            .or_else(|| {
                let details = body.details?;
                key_column(&details).map(|column| format!("Key ({column})"))
            })
            .unwrap_or_default();
        return InsertError::UniqueViolation(message);
    }
    InsertError::Rejected(anyhow::anyhow!(
        "datastore answered {status} (code: {:?}, message: {:?})",
        body.code,
        body.message,
    ))
}

/// `Key (email)=(john@example.com) already exists.` -> `email`
fn key_column(details: &str) -> Option<&str> {
    let (column, _) = details.strip_prefix("Key (")?.split_once(")=")?;
    Some(column)
}
