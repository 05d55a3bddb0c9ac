use crate::application::error::{ApplicationError, ApplicationResult};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

const TAG_KEY: &[u8] = b"article-desk/master-key";

/// Shared administrative secret. Only an HMAC tag of the key is retained and
/// candidates are checked with a constant-time comparison. The secret is the
/// HMAC message, never the HMAC key, so padded or digested variants differ.
#[derive(Clone)]
pub struct MasterKey {
    tag: Vec<u8>,
}

impl MasterKey {
    pub fn new(secret: &str) -> ApplicationResult<Self> {
        if secret.is_empty() {
            return Err(ApplicationError::infrastructure("master key cannot be empty"));
        }
        let tag = tag_for(secret)?.finalize().into_bytes().to_vec();
        Ok(Self { tag })
    }

    pub fn matches(&self, candidate: &str) -> bool {
        match tag_for(candidate) {
            Ok(mac) => mac.verify_slice(&self.tag).is_ok(),
            Err(_) => false,
        }
    }
}

fn tag_for(secret: &str) -> ApplicationResult<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(TAG_KEY)
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
    mac.update(secret.as_bytes());
    Ok(mac)
}

impl fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MasterKey(<redacted>)")
    }
}
