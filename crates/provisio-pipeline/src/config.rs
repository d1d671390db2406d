//! Pipeline configuration.

/// Configuration for one reconciliation pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Recipient of the validation-error report.
    pub admin_recipient: String,
    /// Fixed operational recipients of the run summary (HR, IT).
    pub summary_recipients: [String; 2],
    /// Length of generated one-time passwords.
    pub password_length: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            admin_recipient: "admin@company.com".into(),
            summary_recipients: [
                "hr-ops@company.com".into(),
                "it-automation@company.com".into(),
            ],
            password_length: 12,
        }
    }
}
