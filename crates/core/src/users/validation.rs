use std::sync::LazyLock;

use regex::Regex;

/// `local@label(.label)*.tld` with an alphabetic TLD of at least two letters.
const EMAIL_PATTERN: &str =
    r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$";

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"));

/// Returns true if `email` has a conventional `local@domain.tld` shape.
///
/// # Examples
///
/// ```
/// use userbase_core::users::is_valid_email;
///
/// assert!(is_valid_email("test@example.com"));
/// assert!(!is_valid_email("not-an-email"));
/// assert!(!is_valid_email("a@b"));
/// ```
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}
