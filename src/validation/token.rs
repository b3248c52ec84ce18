//! Attribution tokens. Every generator takes its RNG explicitly.

use rand::Rng;

pub const TOKEN_PREFIX: &str = "loxs";

pub fn random_hex<R: Rng + ?Sized>(rng: &mut R, bytes: usize) -> String {
    let mut buf = vec![0u8; bytes];
    rng.fill(&mut buf[..]);
    hex::encode(buf)
}

/// XSS canary, 12 hex chars
pub fn canary<R: Rng + ?Sized>(rng: &mut R) -> String {
    random_hex(rng, 6)
}

/// CRLF token, prefixed so it is recognisable in header names
pub fn crlf_token<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{}{}", TOKEN_PREFIX, random_hex(rng, 6))
}

/// Unresolvable marker domain for redirect probes
pub fn marker_domain<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{}{}.test", TOKEN_PREFIX, random_hex(rng, 4))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_canaries_are_unique() {
        let mut rng = rand::rng();
        let tokens: HashSet<String> = (0..10_000).map(|_| canary(&mut rng)).collect();
        assert_eq!(tokens.len(), 10_000);
    }

    #[test]
    fn test_shapes() {
        let mut rng = rand::rng();
        assert_eq!(canary(&mut rng).len(), 12);

        let token = crlf_token(&mut rng);
        assert!(token.starts_with("loxs"));
        assert_eq!(token.len(), 16);

        let domain = marker_domain(&mut rng);
        assert!(domain.starts_with("loxs") && domain.ends_with(".test"));
    }
}
