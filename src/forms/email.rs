//! Resolution of the account login email when a form collects both an
//! organization email and a contact-person email.
//!
//! Equal candidates are rejected outright rather than treated as "no
//! disambiguation needed"; the portal ships a dedicated error message for
//! that case, so the behavior is deliberate.

/// Result of resolving the two candidate emails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailResolution {
    /// Exactly one candidate was supplied; it becomes the account email
    /// with no user interaction.
    Resolved(String),
    /// Both candidates are present and differ: the submission must pause
    /// until the user picks one.
    NeedsChoice { candidates: [String; 2] },
}

impl EmailResolution {
    /// Whether `choice` is a legal answer to a pending disambiguation.
    pub fn permits(&self, choice: &str) -> bool {
        match self {
            EmailResolution::Resolved(email) => email == choice,
            EmailResolution::NeedsChoice { candidates } => {
                candidates.iter().any(|candidate| candidate == choice)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmailResolutionError {
    #[error("The contact person email should be different from the company email.")]
    IdenticalCandidates,
    #[error("No account email provided.")]
    MissingCandidates,
}

/// Produce exactly one account email from the two optional candidates.
/// Empty or whitespace-only inputs count as absent.
pub fn resolve_account_email(
    company: &str,
    contact_person: &str,
) -> Result<EmailResolution, EmailResolutionError> {
    let company = company.trim();
    let contact_person = contact_person.trim();

    match (company.is_empty(), contact_person.is_empty()) {
        (true, true) => Err(EmailResolutionError::MissingCandidates),
        (false, true) => Ok(EmailResolution::Resolved(company.to_string())),
        (true, false) => Ok(EmailResolution::Resolved(contact_person.to_string())),
        (false, false) if company == contact_person => {
            Err(EmailResolutionError::IdenticalCandidates)
        }
        (false, false) => Ok(EmailResolution::NeedsChoice {
            candidates: [company.to_string(), contact_person.to_string()],
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_candidate_resolves_directly() {
        assert_eq!(
            resolve_account_email("ops@acme.example", ""),
            Ok(EmailResolution::Resolved("ops@acme.example".to_string()))
        );
        assert_eq!(
            resolve_account_email("", "jane@acme.example"),
            Ok(EmailResolution::Resolved("jane@acme.example".to_string()))
        );
    }

    #[test]
    fn equal_candidates_are_rejected() {
        assert_eq!(
            resolve_account_email("ops@acme.example", "ops@acme.example"),
            Err(EmailResolutionError::IdenticalCandidates)
        );
    }

    #[test]
    fn distinct_candidates_require_an_explicit_choice() {
        let resolution =
            resolve_account_email("a@x.com", "b@x.com").expect("distinct candidates resolve");
        assert_eq!(
            resolution,
            EmailResolution::NeedsChoice {
                candidates: ["a@x.com".to_string(), "b@x.com".to_string()]
            }
        );
        assert!(resolution.permits("b@x.com"));
        assert!(!resolution.permits("c@x.com"));
    }

    #[test]
    fn missing_candidates_are_an_error() {
        assert_eq!(
            resolve_account_email("", "   "),
            Err(EmailResolutionError::MissingCandidates)
        );
    }
}
