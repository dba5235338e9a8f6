mod alias;
mod entry_email;
mod validation;
mod waitlist_entry;
// allow external `use` statements to skip `alias` etc
pub use alias::Alias;
pub use entry_email::EntryEmail;
pub use validation::ValidationError;
pub use waitlist_entry::WaitlistEntry;
