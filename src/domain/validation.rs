/// Input rejected before any datastore call. `Display` is the text shown
/// inline under the form.
#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum ValidationError {
    #[error("Please enter an alias")]
    AliasRequired,
    #[error("Alias can only contain letters, numbers, dots, hyphens, and underscores")]
    AliasInvalidCharacters,
    #[error("Please enter your email")]
    EmailRequired,
    #[error("Please enter a valid email address")]
    EmailInvalid,
}
