//! Employee portal one-time codes and portal tokens.
//!
//! Codes and tokens live only in server memory; a restart invalidates
//! both. A code is bound to one email address, expires after the
//! configured TTL, and is consumed by its first successful
//! verification. A successful verification yields an opaque portal
//! token used by the portal notification endpoints.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use rand::Rng;
use uuid::Uuid;

struct PendingCode {
    code: String,
    expires_at: Instant,
}

pub struct OtpService {
    ttl: Duration,
    codes: Mutex<HashMap<String, PendingCode>>,
    /// portal token → email
    sessions: Mutex<HashMap<String, String>>,
}

impl OtpService {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            codes: Mutex::new(HashMap::new()),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Issue a fresh 6-digit code for `email`, replacing any code still
    /// pending for the same address.
    pub fn issue(&self, email: &str) -> String {
        let code = format!("{:06}", rand::thread_rng().gen_range(0..1_000_000));
        let mut codes = lock(&self.codes);
        codes.insert(
            email.to_lowercase(),
            PendingCode {
                code: code.clone(),
                expires_at: Instant::now() + self.ttl,
            },
        );
        code
    }

    /// Verify a code. On success the code is consumed and a portal
    /// token is returned; an expired code is dropped; a wrong code
    /// leaves the pending entry in place.
    pub fn verify(&self, email: &str, code: &str) -> Option<String> {
        let key = email.to_lowercase();
        let mut codes = lock(&self.codes);
        let pending = codes.get(&key)?;
        if Instant::now() >= pending.expires_at {
            codes.remove(&key);
            return None;
        }
        if pending.code != code {
            return None;
        }
        codes.remove(&key);
        drop(codes);

        let token = Uuid::new_v4().to_string();
        lock(&self.sessions).insert(token.clone(), key);
        Some(token)
    }

    /// Resolve a portal token to the email it authenticates.
    pub fn session_email(&self, token: &str) -> Option<String> {
        lock(&self.sessions).get(token).cloned()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_code_is_six_digits() {
        let otp = OtpService::new(Duration::from_secs(300));
        let code = otp.issue("alice@company.com");
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn verify_consumes_the_code() {
        let otp = OtpService::new(Duration::from_secs(300));
        let code = otp.issue("alice@company.com");
        let token = otp.verify("alice@company.com", &code);
        assert!(token.is_some());
        // Single use.
        assert!(otp.verify("alice@company.com", &code).is_none());
    }

    #[test]
    fn wrong_code_does_not_consume() {
        let otp = OtpService::new(Duration::from_secs(300));
        let code = otp.issue("alice@company.com");
        assert!(otp.verify("alice@company.com", "000000").is_none() || code == "000000");
        if code != "000000" {
            assert!(otp.verify("alice@company.com", &code).is_some());
        }
    }

    #[test]
    fn expired_code_is_rejected() {
        let otp = OtpService::new(Duration::from_millis(0));
        let code = otp.issue("alice@company.com");
        std::thread::sleep(Duration::from_millis(5));
        assert!(otp.verify("alice@company.com", &code).is_none());
    }

    #[test]
    fn email_matching_is_case_insensitive() {
        let otp = OtpService::new(Duration::from_secs(300));
        let code = otp.issue("Alice@Company.com");
        assert!(otp.verify("alice@company.com", &code).is_some());
    }

    #[test]
    fn token_resolves_to_email() {
        let otp = OtpService::new(Duration::from_secs(300));
        let code = otp.issue("alice@company.com");
        let token = otp.verify("alice@company.com", &code).unwrap();
        assert_eq!(
            otp.session_email(&token).as_deref(),
            Some("alice@company.com")
        );
        assert!(otp.session_email("bogus").is_none());
    }

    #[test]
    fn reissue_replaces_the_pending_code() {
        let otp = OtpService::new(Duration::from_secs(300));
        let first = otp.issue("alice@company.com");
        let second = otp.issue("alice@company.com");
        if first != second {
            assert!(otp.verify("alice@company.com", &first).is_none());
        }
        assert!(otp.verify("alice@company.com", &second).is_some());
    }
}
