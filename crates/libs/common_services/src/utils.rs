/// Generate a random string of `length` characters drawn from `alphabet`.
#[must_use]
pub fn random_string(alphabet: &[u8], length: usize) -> String {
    (0..length)
        .map(|_| {
            let idx = rand::random_range(0..alphabet.len());
            alphabet[idx] as char
        })
        .collect()
}
