use crate::utils::random_string;

pub const JOIN_CODE_LENGTH: usize = 6;
const JOIN_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// A fresh random join code. Uniqueness is enforced by the database, not here.
#[must_use]
pub fn generate_join_code() -> String {
    random_string(JOIN_CODE_ALPHABET, JOIN_CODE_LENGTH)
}

/// Codes are matched case-insensitively and typed by humans, so trim and uppercase them.
#[must_use]
pub fn normalize_join_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Whether a normalized code could possibly have been generated by `generate_join_code`.
#[must_use]
pub fn is_well_formed(code: &str) -> bool {
    code.len() == JOIN_CODE_LENGTH && code.bytes().all(|b| JOIN_CODE_ALPHABET.contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_are_six_uppercase_alphanumerics() {
        for _ in 0..200 {
            let code = generate_join_code();
            assert!(is_well_formed(&code), "{code}");
            assert!(
                code.chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
            );
        }
    }

    #[test]
    fn normalization_uppercases_and_trims() {
        assert_eq!(normalize_join_code(" ab12cd\n"), "AB12CD");
        assert!(is_well_formed(&normalize_join_code("ab12cd")));
    }

    #[test]
    fn malformed_codes_are_recognised() {
        assert!(!is_well_formed("ABC"));
        assert!(!is_well_formed("ABCDEFG"));
        assert!(!is_well_formed("AB-12C"));
        assert!(!is_well_formed("ab12cd"));
    }
}
