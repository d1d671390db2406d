//! Row validation against static reference data.
//!
//! All checks run on every row; nothing short-circuits, so one row can
//! carry multiple errors. Validation is side-effect free.

use chrono::NaiveDate;
use provisio_core::catalog::DepartmentCatalog;
use provisio_core::models::row::{InputRow, ValidationOutcome};
use provisio_core::models::user::UserStatus;

/// Accepted join-date layouts: ISO, slash-separated (month-first,
/// then day-first), and named-month forms. First match wins.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Validate one input row.
pub fn validate(row: &InputRow, catalog: &DepartmentCatalog) -> ValidationOutcome {
    let mut errors = Vec::new();

    let required: [(&str, &str); 6] = [
        ("name", &row.name),
        ("email", &row.email),
        ("department", &row.department),
        ("role", &row.role),
        ("join_date", &row.join_date),
        ("status", &row.status),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            errors.push(format!("Missing required field: {field}"));
        }
    }

    let email = row.email.trim();
    if !email.is_empty() && !is_valid_email(email) {
        errors.push("Invalid email format".to_string());
    }

    let department = row.department.trim();
    if !department.is_empty() && !catalog.contains(department) {
        errors.push(format!("Unknown department: {department}"));
    }

    let join_date = row.join_date.trim();
    if !join_date.is_empty() && parse_join_date(join_date).is_none() {
        errors.push("Invalid join_date".to_string());
    }

    if UserStatus::parse(&row.status).is_none() {
        errors.push("Status must be 'active' or 'inactive'".to_string());
    }

    ValidationOutcome { errors }
}

/// Parse a join date under the permissive multi-format grammar.
pub fn parse_join_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

/// Practical email-address check: one `@`, non-empty local part, and a
/// dotted domain whose labels are alphanumeric-or-hyphen with no
/// leading or trailing hyphen.
pub fn is_valid_email(email: &str) -> bool {
    if email.len() > 254 || email.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    if !domain.contains('.') {
        return false;
    }
    domain.split('.').all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_date_formats() {
        for date in [
            "2025-11-15",
            "2025/11/15",
            "11/15/2025",
            "15/11/2025",
            "November 15, 2025",
            "Nov 15, 2025",
            "15 November 2025",
        ] {
            assert!(parse_join_date(date).is_some(), "should parse: {date}");
        }
    }

    #[test]
    fn rejects_nonsense_dates() {
        for date in ["soon", "2025-13-45", "15.11.2025", "99/99/9999"] {
            assert!(parse_join_date(date).is_none(), "should reject: {date}");
        }
    }

    #[test]
    fn email_grammar_basics() {
        assert!(is_valid_email("alice@company.com"));
        assert!(is_valid_email("dev+test@sub.company.co"));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("@company.com"));
        assert!(!is_valid_email("alice@nodot"));
        assert!(!is_valid_email("alice@-bad.com"));
        assert!(!is_valid_email("alice@bad..com"));
        assert!(!is_valid_email("ali ce@company.com"));
    }
}
