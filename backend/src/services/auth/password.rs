//! bcrypt password hashes.

use bcrypt::BcryptError;

#[cfg(not(test))]
const COST: u32 = bcrypt::DEFAULT_COST;
// Minimum cost keeps the test suite fast.
#[cfg(test)]
const COST: u32 = 4;

pub fn hash_password(password: &str) -> Result<String, BcryptError> {
    bcrypt::hash(password, COST)
}

/// False for a wrong password and for stored values that are not bcrypt hashes.
pub fn verify_password(password: &str, stored: &str) -> bool {
    bcrypt::verify(password, stored).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_verify_only_the_right_password() {
        let stored = hash_password("hunter22").expect("hash");
        assert!(stored.starts_with("$2"));
        assert!(verify_password("hunter22", &stored));
        assert!(!verify_password("hunter23", &stored));
    }

    #[test]
    fn equal_passwords_get_different_salts() {
        let first = hash_password("same").expect("hash");
        let second = hash_password("same").expect("hash");
        assert_ne!(first, second);
        assert!(verify_password("same", &first));
        assert!(verify_password("same", &second));
    }

    #[test]
    fn malformed_hashes_never_verify() {
        assert!(!verify_password("x", "no-separator"));
        assert!(!verify_password("x", ""));
    }
}
