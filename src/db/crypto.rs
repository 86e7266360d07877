use anyhow::{anyhow, bail, Result};
use base64::{
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
    Engine as _,
};
use hkdf::Hkdf;
use sha2::Sha256;

const KEY_SIZE: usize = 32;

const SEAL_KEY_INFO: &[u8] = b"banklink/sealed-secrets/v1";
const SHAREABLE_ID_KEY_INFO: &[u8] = b"banklink/shareable-id/key/v1";
const SHAREABLE_ID_NONCE_INFO: &[u8] = b"banklink/shareable-id/nonce/v1";

pub trait Cipher {
    type EncryptionKey;

    fn new_key() -> Self::EncryptionKey;
    fn with_key(key: &Self::EncryptionKey) -> Self;
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>>;
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>>;
}

mod xchacha20poly1305cipher {
    use chacha20poly1305::{
        aead::{Aead, AeadCore, KeyInit, OsRng},
        Key, XChaCha20Poly1305,
    };

    use super::*;

    pub(super) const NONCE_LEN: usize = 24;

    pub struct XChaCha20Poly1305Cipher {
        cipher: XChaCha20Poly1305,
    }

    impl Cipher for XChaCha20Poly1305Cipher {
        type EncryptionKey = Key;

        fn new_key() -> Key {
            XChaCha20Poly1305::generate_key(&mut OsRng)
        }

        fn with_key(key: &Key) -> Self {
            Self {
                cipher: XChaCha20Poly1305::new(key),
            }
        }

        fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
            let nonce = XChaCha20Poly1305::generate_nonce(&mut OsRng);
            seal_with_nonce(&self.cipher, &nonce, plaintext)
        }

        fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
            open(&self.cipher, ciphertext)
        }
    }

    pub(super) fn seal_with_nonce(
        cipher: &XChaCha20Poly1305,
        nonce: &chacha20poly1305::XNonce,
        plaintext: &[u8],
    ) -> Result<Vec<u8>> {
        let ciphertext = cipher
            .encrypt(nonce, plaintext)
            .map_err(|err| anyhow!("Encryption failed: {err}"))?;

        let mut result = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        result.extend_from_slice(nonce);
        result.extend_from_slice(&ciphertext);

        Ok(result)
    }

    pub(super) fn open(cipher: &XChaCha20Poly1305, ciphertext: &[u8]) -> Result<Vec<u8>> {
        if ciphertext.len() < NONCE_LEN {
            bail!("Ciphertext too small for nonce");
        }
        let (nonce, ciphertext) = ciphertext.split_at(NONCE_LEN);

        let plaintext = cipher
            .decrypt(nonce.into(), ciphertext)
            .map_err(|err| anyhow!("Decryption failed: {err}"))?;
        Ok(plaintext)
    }
}
pub use xchacha20poly1305cipher::XChaCha20Poly1305Cipher;

/// The configured 32 byte key all other keys are derived from.
#[derive(Clone)]
pub struct MasterKey([u8; KEY_SIZE]);

impl MasterKey {
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let bytes = STANDARD.decode(encoded.trim())?;
        let bytes: [u8; KEY_SIZE] = bytes.try_into().map_err(|bytes: Vec<u8>| {
            anyhow!("Encryption key must be {KEY_SIZE} bytes but is {}", bytes.len())
        })?;
        Ok(Self(bytes))
    }

    pub fn generate_base64() -> String {
        let key = XChaCha20Poly1305Cipher::new_key();
        STANDARD.encode(key)
    }

    fn derive(&self, info: &[u8]) -> Result<[u8; KEY_SIZE]> {
        let hkdf = Hkdf::<Sha256>::new(None, &self.0);
        let mut okm = [0; KEY_SIZE];
        hkdf.expand(info, &mut okm)
            .map_err(|err| anyhow!("Key derivation failed: {err}"))?;
        Ok(okm)
    }
}

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MasterKey(*****)")
    }
}

/// Seals secrets before they go to the document store. Every call uses a fresh nonce.
pub struct SecretSealer {
    cipher: XChaCha20Poly1305Cipher,
}

impl SecretSealer {
    pub fn new(master_key: &MasterKey) -> Result<Self> {
        let key = master_key.derive(SEAL_KEY_INFO)?;
        Ok(Self {
            cipher: XChaCha20Poly1305Cipher::with_key(&key.into()),
        })
    }

    pub fn seal(&self, plaintext: &str) -> Result<String> {
        let ciphertext = self.cipher.encrypt(plaintext.as_bytes())?;
        Ok(STANDARD.encode(ciphertext))
    }

    pub fn unseal(&self, sealed: &str) -> Result<String> {
        let ciphertext = STANDARD.decode(sealed)?;
        let plaintext = self.cipher.decrypt(&ciphertext)?;
        Ok(String::from_utf8(plaintext)?)
    }
}

/// Reversible, deterministic obfuscation of account ids.
///
/// The nonce is an HMAC of the plaintext, so the same account id always maps to
/// the same shareable id and the output still authenticates on decode. The
/// encoding is url-safe base64 and always longer than the input.
pub struct ShareableIdCodec {
    cipher: chacha20poly1305::XChaCha20Poly1305,
    nonce_key: [u8; KEY_SIZE],
}

impl ShareableIdCodec {
    pub fn new(master_key: &MasterKey) -> Result<Self> {
        use chacha20poly1305::KeyInit;

        let key = master_key.derive(SHAREABLE_ID_KEY_INFO)?;
        let nonce_key = master_key.derive(SHAREABLE_ID_NONCE_INFO)?;
        Ok(Self {
            cipher: chacha20poly1305::XChaCha20Poly1305::new(&key.into()),
            nonce_key,
        })
    }

    pub fn encrypt(&self, account_id: &str) -> Result<String> {
        let nonce = self.synthetic_nonce(account_id.as_bytes())?;
        let ciphertext =
            xchacha20poly1305cipher::seal_with_nonce(&self.cipher, &nonce, account_id.as_bytes())?;
        Ok(URL_SAFE_NO_PAD.encode(ciphertext))
    }

    pub fn decrypt(&self, shareable_id: &str) -> Result<String> {
        let ciphertext = URL_SAFE_NO_PAD.decode(shareable_id)?;
        let plaintext = xchacha20poly1305cipher::open(&self.cipher, &ciphertext)?;
        Ok(String::from_utf8(plaintext)?)
    }

    fn synthetic_nonce(&self, plaintext: &[u8]) -> Result<chacha20poly1305::XNonce> {
        use hmac::{Hmac, Mac};

        let mut mac = <Hmac<Sha256> as Mac>::new_from_slice(&self.nonce_key)
            .map_err(|err| anyhow!("Invalid nonce key: {err}"))?;
        mac.update(plaintext);
        let tag = mac.finalize().into_bytes();
        Ok(chacha20poly1305::XNonce::clone_from_slice(
            &tag[..xchacha20poly1305cipher::NONCE_LEN],
        ))
    }
}

#[cfg(test)]
mod tests {
    use chacha20poly1305::Key;
    use rand::{rngs::StdRng, RngCore, SeedableRng};

    use super::*;

    fn key(seed: u64) -> Key {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut key_bytes = [0; KEY_SIZE];
        rng.fill_bytes(&mut key_bytes);
        Key::clone_from_slice(&key_bytes)
    }

    fn master_key(seed: u64) -> MasterKey {
        MasterKey::from_base64(&STANDARD.encode(key(seed))).unwrap()
    }

    #[test]
    fn given_emptydata_when_encrypted_then_canbedecrypted() {
        let plaintext = &[];
        let cipher = XChaCha20Poly1305Cipher::with_key(&key(1));
        let ciphertext = cipher.encrypt(plaintext).unwrap();
        let decrypted_plaintext = cipher.decrypt(&ciphertext).unwrap();
        assert_eq!(plaintext.to_vec(), decrypted_plaintext);
    }

    #[test]
    fn given_somedata_when_encrypted_then_canbedecrypted() {
        let plaintext = hex::decode("0ffc9a43e15ccfbef1b0880167df335677c9005948eeadb31f89b06b90a364ad03c6b0859652dca960f8fa60c75747c4f0a67f50f5b85b800468559ea1a816173c0abaf5df8f02978a54b250bc57c7c6a55d4d245014722c0b1764718a6d5ca654976370").unwrap();

        let cipher = XChaCha20Poly1305Cipher::with_key(&key(1));
        let ciphertext = cipher.encrypt(&plaintext).unwrap();
        let decrypted_plaintext = cipher.decrypt(&ciphertext).unwrap();
        assert_eq!(plaintext.to_vec(), decrypted_plaintext);
    }

    #[test]
    fn given_invalidciphertext_then_doesntdecrypt() {
        let cipher = XChaCha20Poly1305Cipher::with_key(&key(1));
        let mut ciphertext = cipher.encrypt(b"access-sandbox-1234").unwrap();
        ciphertext[20] ^= 1;
        assert!(cipher.decrypt(&ciphertext).is_err());
    }

    #[test]
    fn given_toosmallciphertext_then_doesntdecrypt() {
        let cipher = XChaCha20Poly1305Cipher::with_key(&key(1));
        assert!(cipher.decrypt(&[0; 10]).is_err());
        assert!(cipher.decrypt(&[]).is_err());
    }

    #[test]
    fn given_differentkey_then_doesntdecrypt() {
        let cipher1 = XChaCha20Poly1305Cipher::with_key(&key(1));
        let cipher2 = XChaCha20Poly1305Cipher::with_key(&key(2));
        let ciphertext = cipher1.encrypt(b"access-sandbox-1234").unwrap();
        assert!(cipher2.decrypt(&ciphertext).is_err());
    }

    #[test]
    fn masterkey_rejects_wrong_length() {
        let error = MasterKey::from_base64(&STANDARD.encode([0u8; 16])).unwrap_err();
        assert_eq!(
            "Encryption key must be 32 bytes but is 16",
            error.to_string()
        );
        assert!(MasterKey::from_base64("not base64!").is_err());
    }

    #[test]
    fn generated_masterkey_can_be_loaded() {
        assert!(MasterKey::from_base64(&MasterKey::generate_base64()).is_ok());
    }

    #[test]
    fn sealed_secret_roundtrips_and_hides_plaintext() {
        let sealer = SecretSealer::new(&master_key(1)).unwrap();
        let sealed = sealer.seal("access-sandbox-de3ce8ef").unwrap();
        assert!(!sealed.contains("access-sandbox"));
        assert_eq!("access-sandbox-de3ce8ef", sealer.unseal(&sealed).unwrap());
    }

    #[test]
    fn sealing_twice_gives_different_ciphertexts() {
        let sealer = SecretSealer::new(&master_key(1)).unwrap();
        assert_ne!(
            sealer.seal("https://api-sandbox.dwolla.com/funding-sources/1").unwrap(),
            sealer.seal("https://api-sandbox.dwolla.com/funding-sources/1").unwrap(),
        );
    }

    #[test]
    fn shareable_id_roundtrips_and_differs_from_account_id() {
        let codec = ShareableIdCodec::new(&master_key(1)).unwrap();
        for account_id in ["", "a", "BxBXxLj1m4HMXBm9WZZmCWVbPjX16EHwv99vp"] {
            let shareable_id = codec.encrypt(account_id).unwrap();
            assert_ne!(account_id, shareable_id);
            assert_eq!(account_id, codec.decrypt(&shareable_id).unwrap());
        }
    }

    #[test]
    fn shareable_id_is_deterministic() {
        let codec = ShareableIdCodec::new(&master_key(1)).unwrap();
        let same_key_codec = ShareableIdCodec::new(&master_key(1)).unwrap();
        assert_eq!(
            codec.encrypt("account-1").unwrap(),
            same_key_codec.encrypt("account-1").unwrap()
        );
        assert_ne!(
            codec.encrypt("account-1").unwrap(),
            codec.encrypt("account-2").unwrap()
        );
    }

    #[test]
    fn shareable_id_is_urlsafe() {
        let codec = ShareableIdCodec::new(&master_key(3)).unwrap();
        let shareable_id = codec.encrypt("account/with+odd=chars").unwrap();
        assert!(shareable_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn shareable_id_from_other_key_doesnt_decrypt() {
        let codec1 = ShareableIdCodec::new(&master_key(1)).unwrap();
        let codec2 = ShareableIdCodec::new(&master_key(2)).unwrap();
        let shareable_id = codec1.encrypt("account-1").unwrap();
        assert!(codec2.decrypt(&shareable_id).is_err());
        assert!(codec1.decrypt("garbage").is_err());
    }
}
