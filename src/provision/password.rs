use rand::{rngs::OsRng, Rng};

pub const PASSWORD_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*";
pub const PASSWORD_LENGTH: usize = 16;

/// A generated temporary password. `Debug` never prints it.
#[derive(Clone, PartialEq, Eq)]
pub struct TemporaryPassword(String);

impl TemporaryPassword {
    /// Draw [`PASSWORD_LENGTH`] characters from the OS CSPRNG.
    pub fn generate() -> Self {
        Self::generate_with_len(PASSWORD_LENGTH)
    }

    /// Independent uniform draws, with replacement, from [`PASSWORD_ALPHABET`].
    pub fn generate_with_len(len: usize) -> Self {
        let mut rng = OsRng;
        let s = (0..len)
            .map(|_| PASSWORD_ALPHABET[rng.gen_range(0..PASSWORD_ALPHABET.len())] as char)
            .collect();
        Self(s)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for TemporaryPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TemporaryPassword(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_length_and_alphabet() {
        for _ in 0..200 {
            let p = TemporaryPassword::generate();
            assert_eq!(p.expose().len(), PASSWORD_LENGTH);
            assert!(p.expose().bytes().all(|b| PASSWORD_ALPHABET.contains(&b)));
        }
        assert_eq!(TemporaryPassword::generate_with_len(4).expose().len(), 4);
    }

    #[test]
    fn test_successive_passwords_differ() {
        let sample: HashSet<String> = (0..1000)
            .map(|_| TemporaryPassword::generate().expose().to_string())
            .collect();
        assert_eq!(sample.len(), 1000);
    }

    #[test]
    fn test_every_symbol_is_reachable() {
        let mut seen = HashSet::new();
        for _ in 0..500 {
            seen.extend(TemporaryPassword::generate().expose().bytes());
        }
        assert_eq!(seen.len(), PASSWORD_ALPHABET.len());
    }

    #[test]
    fn test_debug_is_redacted() {
        let p = TemporaryPassword::generate();
        assert!(!format!("{:?}", p).contains(p.expose()));
    }
}
