//! Field validation rules.
//!
//! Each form declares its schema as rule chains over its field values: a
//! rule returns the violation message or `None`, and [`first`] picks the
//! first violation of a chain. Screens keep one error signal per field
//! and show the message inline next to the control.

pub type Violation = Option<&'static str>;

pub fn required(value: &str, message: &'static str) -> Violation {
    if value.trim().is_empty() {
        Some(message)
    } else {
        None
    }
}

/// Shape check only: local part, `@`, and a dotted domain. The server
/// revalidates; this catches obvious typos before a round-trip. Empty
/// input is left to [`required`].
pub fn email_format(value: &str, message: &'static str) -> Violation {
    if value.is_empty() || is_email(value) {
        None
    } else {
        Some(message)
    }
}

/// Minimum length in characters, empty input left to [`required`].
pub fn min_len(value: &str, min: usize, message: &'static str) -> Violation {
    if !value.is_empty() && value.chars().count() < min {
        Some(message)
    } else {
        None
    }
}

pub fn must_match(value: &str, other: &str, message: &'static str) -> Violation {
    if value == other { None } else { Some(message) }
}

/// First violated rule wins; the rest of the chain is not reported.
pub fn first<const N: usize>(checks: [Violation; N]) -> Violation {
    checks.into_iter().flatten().next()
}

fn is_email(value: &str) -> bool {
    if value.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rejects_blank_input() {
        assert_eq!(required("", "Name is required"), Some("Name is required"));
        assert_eq!(required("   ", "Name is required"), Some("Name is required"));
        assert_eq!(required("Ada", "Name is required"), None);
    }

    #[test]
    fn test_email_format() {
        assert_eq!(email_format("ada@example.com", "Invalid email address"), None);
        assert_eq!(email_format("a@b.co", "Invalid email address"), None);
        assert_eq!(
            email_format("not-an-email", "Invalid email address"),
            Some("Invalid email address")
        );
        assert_eq!(
            email_format("missing@tld", "Invalid email address"),
            Some("Invalid email address")
        );
        assert_eq!(
            email_format("two words@example.com", "Invalid email address"),
            Some("Invalid email address")
        );
        // emptiness belongs to required()
        assert_eq!(email_format("", "Invalid email address"), None);
    }

    #[test]
    fn test_min_len_counts_characters() {
        assert_eq!(min_len("12345", 6, "too short"), Some("too short"));
        assert_eq!(min_len("123456", 6, "too short"), None);
        assert_eq!(min_len("", 6, "too short"), None);
    }

    #[test]
    fn test_must_match() {
        assert_eq!(must_match("a", "a", "Passwords must match"), None);
        assert_eq!(
            must_match("a", "b", "Passwords must match"),
            Some("Passwords must match")
        );
    }

    #[test]
    fn test_first_picks_the_first_violation() {
        let violation = first([
            required("", "Email is required"),
            email_format("", "Invalid email address"),
        ]);
        assert_eq!(violation, Some("Email is required"));

        let violation = first([
            required("nope", "Email is required"),
            email_format("nope", "Invalid email address"),
        ]);
        assert_eq!(violation, Some("Invalid email address"));

        let violation = first([
            required("ada@example.com", "Email is required"),
            email_format("ada@example.com", "Invalid email address"),
        ]);
        assert_eq!(violation, None);
    }
}
