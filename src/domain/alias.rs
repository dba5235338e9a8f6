use super::ValidationError;

/// The local part of a proxy address, e.g. `john_doe` in
/// `john_doe@receiptIt.app`.
///
/// Must be instantiated with `Alias::parse`, which accepts only
/// `[a-zA-Z0-9._-]+`. Case is preserved; lowercasing is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias(String);

impl Alias {
    pub fn parse(alias: String) -> Result<Self, ValidationError> {
        if alias.is_empty() {
            return Err(ValidationError::AliasRequired);
        }
        match alias.chars().all(is_alias_char) {
            true => Ok(Self(alias)),
            false => Err(ValidationError::AliasInvalidCharacters),
        }
    }

    /// Lowercased copy. Only ever narrows the character set, so the result is
    /// still a valid alias.
    pub fn to_lowercase(&self) -> Self { Self(self.0.to_ascii_lowercase()) }

    /// `alias@domain`, as displayed to the user
    pub fn address(
        &self,
        domain: &str,
    ) -> String {
        format!("{}@{domain}", self.0)
    }
}

fn is_alias_char(c: char) -> bool { c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') }

impl AsRef<str> for Alias {
    fn as_ref(&self) -> &str { &self.0 }
}
