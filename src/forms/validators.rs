//! Pure field-level predicates shared across the workflows.

/// A required text field passes iff its trimmed value is non-empty.
pub fn required_text(value: &str) -> bool {
    !value.trim().is_empty()
}

/// A required list field passes iff it holds at least one non-blank entry.
pub fn has_entries(items: &[String]) -> bool {
    items.iter().any(|item| !item.trim().is_empty())
}

fn is_special(c: char) -> bool {
    c == '_' || !c.is_ascii_alphanumeric()
}

/// Itemized password policy, recomputed on every change of the password or
/// its confirmation. All six checks must hold before a credential-setting
/// submission is allowed; the checklist itself is exposed so the UI can
/// render per-rule ticks, but failure is reported with one uniform message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PasswordChecklist {
    pub length: bool,
    pub uppercase: bool,
    pub lowercase: bool,
    pub digit: bool,
    pub special_char: bool,
    pub passwords_match: bool,
}

impl PasswordChecklist {
    pub const REQUIREMENTS_MESSAGE: &'static str =
        "Please ensure your password meets all the requirements.";

    pub fn evaluate(password: &str, confirmation: &str) -> Self {
        Self {
            length: password.chars().count() >= 8,
            uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
            lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
            digit: password.chars().any(|c| c.is_ascii_digit()),
            special_char: password.chars().any(is_special),
            passwords_match: password == confirmation && !password.is_empty(),
        }
    }

    pub fn satisfied(&self) -> bool {
        self.length
            && self.uppercase
            && self.lowercase
            && self.digit
            && self.special_char
            && self.passwords_match
    }
}
