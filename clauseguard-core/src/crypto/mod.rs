use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Key, Nonce,
};
use base64::{engine::general_purpose::STANDARD, engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::rngs::OsRng;
use rand_core::TryRngCore;
use std::sync::Arc;

use crate::Error;

const NONCE_LEN: usize = 12;

/// Authenticated encryption for small payloads such as session claims.
///
/// Output is URL-safe base64 of `nonce || ciphertext`, so it can travel in a header
/// without further escaping. Anything that was not sealed with the same key fails to open.
#[derive(Clone)]
pub struct TokenCipher {
    cipher: Arc<Aes256Gcm>,
}

impl TokenCipher {
    /// Creates a cipher from a 32-byte AES-256 key.
    pub fn new(key_bytes: &[u8]) -> Result<Self, Error> {
        if key_bytes.len() != 32 {
            return Err(Error::Config(
                format!("AES-256 key must be 32 bytes, got {}", key_bytes.len())
            ));
        }
        let key = Key::<Aes256Gcm>::clone_from_slice(key_bytes);

        Ok(Self {
            cipher: Arc::new(Aes256Gcm::new(&key)),
        })
    }

    /// Creates a cipher from a standard-base64 encoded 32-byte key.
    pub fn from_base64_key(encoded: &str) -> Result<Self, Error> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| Error::Config(format!("session key is not valid base64: {}", e)))?;
        Self::new(&bytes)
    }

    /// Generates a fresh random key, base64 encoded.
    pub fn generate_base64_key() -> Result<String, Error> {
        let mut key = [0u8; 32];
        OsRng
            .try_fill_bytes(&mut key)
            .map_err(|e| Error::Encryption(e.to_string()))?;
        Ok(STANDARD.encode(key))
    }

    pub fn seal(&self, plaintext: &[u8]) -> Result<String, Error> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng
            .try_fill_bytes(&mut nonce_bytes)
            .map_err(|e| Error::Encryption(e.to_string()))?;
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self.cipher
            .encrypt(nonce, plaintext)
            .map_err(|e| Error::Encryption(e.to_string()))?;

        let mut combined = nonce_bytes.to_vec();
        combined.extend(ciphertext);

        Ok(URL_SAFE_NO_PAD.encode(combined))
    }

    pub fn open(&self, sealed: &str) -> Result<Vec<u8>, Error> {
        let data = URL_SAFE_NO_PAD.decode(sealed)
            .map_err(|e| Error::Decryption(e.to_string()))?;

        if data.len() < NONCE_LEN {
            return Err(Error::Decryption(
                "Ciphertext too short (missing nonce)".to_owned()
            ));
        }
        let (nonce_bytes, ciphertext) = data.split_at(NONCE_LEN);
        let nonce = Nonce::from_slice(nonce_bytes);

        self.cipher
            .decrypt(nonce, ciphertext)
            .map_err(|e| Error::Decryption(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seal_then_open() {
        let cipher = TokenCipher::new(&[7u8; 32]).unwrap();
        let sealed = cipher.seal(b"hello").unwrap();
        assert!(!sealed.contains('+') && !sealed.contains('/') && !sealed.contains('='));
        assert_eq!(cipher.open(&sealed).unwrap(), b"hello");
    }

    #[test]
    fn other_key_cannot_open() {
        let a = TokenCipher::new(&[1u8; 32]).unwrap();
        let b = TokenCipher::new(&[2u8; 32]).unwrap();
        let sealed = a.seal(b"secret").unwrap();
        assert!(matches!(b.open(&sealed), Err(Error::Decryption(_))));
    }

    #[test]
    fn rejects_bad_keys_and_garbage() {
        assert!(matches!(TokenCipher::new(&[0u8; 16]), Err(Error::Config(_))));
        assert!(TokenCipher::from_base64_key("not base64!").is_err());
        let cipher = TokenCipher::new(&[3u8; 32]).unwrap();
        assert!(cipher.open("abc").is_err());
        assert!(cipher.open("!!!").is_err());
    }

    #[test]
    fn generated_key_round_trips() {
        let key = TokenCipher::generate_base64_key().unwrap();
        assert!(TokenCipher::from_base64_key(&key).is_ok());
    }
}
