//! Input validation helpers.

/// Validate email address format.
///
/// This performs basic RFC 5322 validation:
/// - Must contain exactly one `@`
/// - Must have non-empty local and domain parts
/// - Length must be between 3 and 255 characters
///
/// For production use, consider using the `email_address` crate for full
/// RFC 5322 compliance.
///
/// # Examples
///
/// ```
/// use stockroom_core::utils::is_valid_email;
///
/// assert!(is_valid_email("user@example.com"));
/// assert!(is_valid_email("user+tag@subdomain.example.com"));
/// assert!(!is_valid_email("invalid"));
/// assert!(!is_valid_email("@example.com"));
/// assert!(!is_valid_email("user@"));
/// ```
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.len() < 3 || email.len() > 255 {
        return false;
    }

    // Must contain exactly one @
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return false;
    }

    let local = parts[0];
    let domain = parts[1];

    if local.is_empty() || domain.is_empty() {
        return false;
    }

    // Domain must contain at least one dot
    if !domain.contains('.') {
        return false;
    }

    let valid_local_chars =
        |c: char| c.is_alphanumeric() || c == '.' || c == '-' || c == '+' || c == '_';
    let valid_domain_chars = |c: char| c.is_alphanumeric() || c == '.' || c == '-';

    if !local.chars().all(valid_local_chars) {
        return false;
    }

    if !domain.chars().all(valid_domain_chars) {
        return false;
    }

    // Domain parts between dots must be non-empty
    for part in domain.split('.') {
        if part.is_empty() {
            return false;
        }
    }

    true
}

/// Validate password strength.
///
/// Passwords must be at least 8 characters and contain at least one
/// letter and one digit.
///
/// # Examples
///
/// ```
/// use stockroom_core::utils::is_valid_password;
///
/// assert!(is_valid_password("abcdef12"));
/// assert!(!is_valid_password("short1"));
/// assert!(!is_valid_password("lettersonly"));
/// assert!(!is_valid_password("12345678"));
/// ```
#[must_use]
pub fn is_valid_password(password: &str) -> bool {
    password.len() >= 8
        && password.chars().any(char::is_alphabetic)
        && password.chars().any(|c| c.is_ascii_digit())
}

/// Validate a contact phone number: 9 or 10 digits, nothing else.
///
/// # Examples
///
/// ```
/// use stockroom_core::utils::is_valid_phone;
///
/// assert!(is_valid_phone("052123456"));
/// assert!(is_valid_phone("0521234567"));
/// assert!(!is_valid_phone("052-123456"));
/// assert!(!is_valid_phone("12345"));
/// ```
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    (9..=10).contains(&phone.len()) && phone.chars().all(|c| c.is_ascii_digit())
}

/// Validate a stock-keeping unit.
///
/// Empty skus are allowed (some inventory rows are imported without one);
/// a non-empty sku may only contain letters, digits, and hyphens.
///
/// # Examples
///
/// ```
/// use stockroom_core::utils::is_valid_sku;
///
/// assert!(is_valid_sku(""));
/// assert!(is_valid_sku("AB-1042"));
/// assert!(!is_valid_sku("AB 1042"));
/// assert!(!is_valid_sku("AB_1042"));
/// ```
#[must_use]
pub fn is_valid_sku(sku: &str) -> bool {
    sku.is_empty() || sku.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}
