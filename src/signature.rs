use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Computes the hex HMAC-SHA256 digest of a raw request body.
pub fn sign(raw_body: &[u8], secret: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts any key length");
    mac.update(raw_body);
    hex::encode(mac.finalize().into_bytes())
}

/// Recomputes the signature and compares it against `candidate`.
///
/// The comparison covers the whole hex digest in constant time; a candidate
/// that matches only a prefix is rejected.
pub fn verify(raw_body: &[u8], secret: &[u8], candidate: &str) -> bool {
    let expected = sign(raw_body, secret);
    let expected = expected.as_bytes();
    let candidate = candidate.as_bytes();

    if expected.len() != candidate.len() {
        return false;
    }
    expected.ct_eq(candidate).into()
}
