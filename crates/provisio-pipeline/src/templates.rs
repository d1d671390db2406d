//! Outbound message templates.

use chrono::{DateTime, Utc};
use provisio_core::models::batch::BatchResult;

pub const WELCOME_SUBJECT: &str = "Welcome to Company – Your Account Details";

pub fn welcome_body(
    name: &str,
    username: &str,
    password: &str,
    department: &str,
    role: &str,
) -> String {
    format!(
        "Hello {name},\n\n\
         Your company account has been created.\n\
         Username: {username}\n\
         Temporary Password: {password}\n\
         Department: {department}\n\
         Role: {role}\n\n\
         Please change your password on first login.\n\n\
         — IT Automation\n"
    )
}

pub fn summary_subject(result: &BatchResult) -> String {
    format!(
        "Provisio Run Summary — {} created, {} deactivated, {} errors",
        result.created, result.deactivated, result.errors
    )
}

pub fn summary_body(result: &BatchResult, processed_at: DateTime<Utc>) -> String {
    format!(
        "Provisio Summary\n\n\
         Created: {}\n\
         Deactivated: {}\n\
         Errors: {}\n\
         Processed at: {}\n",
        result.created,
        result.deactivated,
        result.errors,
        processed_at.to_rfc3339()
    )
}

pub fn validation_report_subject(error_count: u64, source: &str) -> String {
    format!("Provisio Validation Errors — {error_count} issues found in {source}")
}

pub fn validation_report_body(
    source: &str,
    valid_count: usize,
    error_count: u64,
    processed_at: DateTime<Utc>,
) -> String {
    format!(
        "Provisio Validation Report\n\n\
         File: {source}\n\
         Processed at: {}\n\n\
         Validation Summary:\n\
         - Valid records: {valid_count}\n\
         - Records with errors: {error_count}\n\n\
         Please review the errors in the admin dashboard and correct \
         the data before re-uploading.\n\n\
         — Provisio\n",
        processed_at.to_rfc3339()
    )
}

pub const OTP_SUBJECT: &str = "Your Provisio Login Code";

pub fn otp_body(code: &str) -> String {
    format!(
        "Your one-time code is: {code}\n\
         This code expires in a few minutes.\n"
    )
}
