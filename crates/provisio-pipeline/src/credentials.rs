//! Username derivation and one-time password generation.

use rand::Rng;

/// Characters eligible for generated passwords.
const PASSWORD_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*";

/// Derive the directory username from an email address: the
/// local part, lowercased, with `+` mapped to `_`.
pub fn username_from_email(email: &str) -> String {
    let local = email.split('@').next().unwrap_or(email);
    local.to_lowercase().replace('+', "_")
}

/// Generate a random one-time password.
///
/// The password is handed to the welcome notification and never
/// persisted.
pub fn generate_password(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| PASSWORD_ALPHABET[rng.gen_range(0..PASSWORD_ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_is_lowercased_local_part() {
        assert_eq!(username_from_email("Alice.Smith@company.com"), "alice.smith");
        assert_eq!(username_from_email("bob@x.org"), "bob");
    }

    #[test]
    fn plus_maps_to_underscore() {
        assert_eq!(username_from_email("dev+test@company.com"), "dev_test");
    }

    #[test]
    fn password_uses_alphabet_and_length() {
        let pw = generate_password(12);
        assert_eq!(pw.len(), 12);
        assert!(pw.bytes().all(|b| PASSWORD_ALPHABET.contains(&b)));
    }
}
