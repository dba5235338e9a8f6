use super::ValidationError;

/// The real address of the person signing up. Only the loose
/// `local@domain.tld` shape is enforced:
///
/// - no whitespace anywhere, exactly one `@`
/// - non-empty local part
/// - a `.` in the domain with at least one character on either side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryEmail(String);

impl EntryEmail {
    pub fn parse(email: String) -> Result<Self, ValidationError> {
        if email.is_empty() {
            return Err(ValidationError::EmailRequired);
        }
        match has_email_shape(&email) {
            true => Ok(Self(email)),
            false => Err(ValidationError::EmailInvalid),
        }
    }
}

fn has_email_shape(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // a dot that is neither the first nor the last character of the domain
    let mut inner = domain.chars();
    inner.next();
    inner.next_back();
    inner.as_str().contains('.')
}

impl AsRef<str> for EntryEmail {
    fn as_ref(&self) -> &str { &self.0 }
}
