//! HMAC-SHA256 cookie signing in the `value.signature` format.

use base64::{Engine as _, engine::general_purpose::STANDARD_NO_PAD};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

#[derive(Clone)]
pub struct CookieSigner {
    secret: Vec<u8>,
}

impl CookieSigner {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
        }
    }

    fn mac(&self) -> HmacSha256 {
        <HmacSha256 as Mac>::new_from_slice(&self.secret).expect("HMAC accepts any key size")
    }

    /// Appends `.` and the unpadded base64 HMAC of `value`.
    pub fn sign(&self, value: &str) -> String {
        let mut mac = self.mac();
        mac.update(value.as_bytes());
        let signature = STANDARD_NO_PAD.encode(mac.finalize().into_bytes());
        format!("{value}.{signature}")
    }

    /// Returns the original value if the signature checks out.
    pub fn unsign(&self, signed: &str) -> Option<String> {
        let (value, signature) = signed.rsplit_once('.')?;
        let provided = STANDARD_NO_PAD.decode(signature).ok()?;

        let mut mac = self.mac();
        mac.update(value.as_bytes());
        mac.verify_slice(&provided).ok()?;

        Some(value.to_string())
    }
}

impl std::fmt::Debug for CookieSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieSigner").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_then_unsign() {
        let signer = CookieSigner::new("super_secret_key_123");
        let signed = signer.sign("session-id.with.dots");

        assert!(signed.starts_with("session-id.with.dots."));
        assert_eq!(signer.unsign(&signed).as_deref(), Some("session-id.with.dots"));
    }

    #[test]
    fn test_rejects_tampering() {
        let signer = CookieSigner::new("secret");
        let signed = signer.sign("alice");
        let tampered = signed.replacen("alice", "mallory", 1);

        assert!(signer.unsign(&tampered).is_none());
        assert!(signer.unsign("alice").is_none());
        assert!(signer.unsign("alice.%%%").is_none());
    }

    #[test]
    fn test_other_secret_rejects() {
        let signed = CookieSigner::new("one").sign("value");
        assert!(CookieSigner::new("two").unsign(&signed).is_none());
    }

    #[test]
    fn test_debug_hides_secret() {
        let debug = format!("{:?}", CookieSigner::new("hunter2"));
        assert!(!debug.contains("hunter2"));
    }
}
