use super::Alias;
use super::EntryEmail;

/// One signup, as sent to the datastore
#[derive(Debug, Clone)]
pub struct WaitlistEntry {
    pub alias: Alias,
    pub email: EntryEmail,
}
