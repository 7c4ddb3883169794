use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{Key, XChaCha20Poly1305, XNonce};
use rand::RngCore;

use crate::error::KeeperError;

/// Encrypts and decrypts opaque strings. Implementations are created once at
/// startup and shared across requests.
#[async_trait]
pub trait SecretKeeper: Send + Sync {
    async fn encrypt(&self, plaintext: &str) -> Result<String, KeeperError>;

    async fn decrypt(&self, ciphertext: &str) -> Result<String, KeeperError>;
}

const NONCE_LEN: usize = 24;
const TAG_LEN: usize = 16;
const CIPHER_CONTEXT: &str = "customers-core 2024-05 local keeper cipher";

/// In-process keeper keyed by a 32-byte master key.
///
/// Layout of a ciphertext: `base64(nonce || XChaCha20-Poly1305 output)`, with a
/// random 24-byte nonce per call. The cipher key is derived from the master
/// key with BLAKE3 `derive_key`.
pub struct LocalStringKeeper {
    cipher: XChaCha20Poly1305,
}

impl LocalStringKeeper {
    pub fn new(master_key: [u8; 32]) -> Self {
        let key = blake3::derive_key(CIPHER_CONTEXT, &master_key);
        Self {
            cipher: XChaCha20Poly1305::new(Key::from_slice(&key)),
        }
    }

    /// Keeper with a freshly generated key, for tests and throwaway setups.
    pub fn random() -> Self {
        let mut master_key = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut master_key);
        Self::new(master_key)
    }

    fn seal(&self, plaintext: &str) -> Result<String, KeeperError> {
        let mut nonce = [0u8; NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce);

        let body = self
            .cipher
            .encrypt(XNonce::from_slice(&nonce), plaintext.as_bytes())
            .map_err(|_| KeeperError("encryption failed".to_string()))?;

        let mut out = Vec::with_capacity(NONCE_LEN + body.len());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&body);
        Ok(STANDARD.encode(out))
    }

    fn open(&self, ciphertext: &str) -> Result<String, KeeperError> {
        let raw = STANDARD
            .decode(ciphertext)
            .map_err(|e| KeeperError(format!("ciphertext is not valid base64: {e}")))?;
        if raw.len() < NONCE_LEN + TAG_LEN {
            return Err(KeeperError("ciphertext is truncated".to_string()));
        }

        let (nonce, body) = raw.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(XNonce::from_slice(nonce), body)
            .map_err(|_| KeeperError("ciphertext failed authentication".to_string()))?;
        String::from_utf8(plaintext).map_err(|_| KeeperError("plaintext is not UTF-8".to_string()))
    }
}

#[async_trait]
impl SecretKeeper for LocalStringKeeper {
    async fn encrypt(&self, plaintext: &str) -> Result<String, KeeperError> {
        self.seal(plaintext)
    }

    async fn decrypt(&self, ciphertext: &str) -> Result<String, KeeperError> {
        self.open(ciphertext)
    }
}
