//! Reversible login cipher. Illustrative only, NOT a security boundary
//!
//! Cyclic-key XOR over the UTF-8 bytes, then URL-safe Base64 (padded) so the
//! result fits in a CSV cell. The key is fixed and there is no salt: anyone
//! holding the key recovers every password.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;

use crate::consts::DEFAULT_CIPHER_KEY;
use crate::error::CipherError;

#[derive(Debug, Clone)]
pub struct SimpleCipher {
    key: Vec<u8>,
}

impl SimpleCipher {
    pub fn new(key: impl Into<Vec<u8>>) -> Result<Self, CipherError> {
        let key = key.into();
        if key.is_empty() {
            return Err(CipherError::EmptyKey);
        }
        Ok(Self { key })
    }

    pub fn encrypt(&self, plaintext: &str) -> String {
        URL_SAFE.encode(xor_cycle(plaintext.as_bytes(), &self.key))
    }

    pub fn decrypt(&self, ciphertext: &str) -> Result<String, CipherError> {
        let bytes = URL_SAFE.decode(ciphertext.trim())?;
        Ok(String::from_utf8(xor_cycle(&bytes, &self.key))?)
    }
}

impl Default for SimpleCipher {
    fn default() -> Self {
        Self {
            key: DEFAULT_CIPHER_KEY.as_bytes().to_vec(),
        }
    }
}

/// XOR `data` with `key` repeated cyclically. Applying it twice is identity.
pub fn xor_cycle(data: &[u8], key: &[u8]) -> Vec<u8> {
    data.iter()
        .zip(key.iter().cycle())
        .map(|(b, k)| b ^ k)
        .collect()
}
