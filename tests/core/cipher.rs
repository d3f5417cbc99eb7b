// tests/core/cipher.rs
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use checkmygrade::cipher::{xor_cycle, SimpleCipher};
use checkmygrade::consts::DEFAULT_CIPHER_KEY;
use checkmygrade::CipherError;

#[test]
fn test_decrypt_inverts_encrypt() {
    let cipher = SimpleCipher::default();
    for plaintext in [
        "",
        "Welcome12#_",
        "NewP@ss1",
        "comma, separated, words",
        "ünïcödé ✓ 密码",
        "longer than the fifteen byte key by quite some margin",
    ] {
        let encrypted = cipher.encrypt(plaintext);
        assert_eq!(cipher.decrypt(&encrypted).unwrap(), plaintext);
    }
}

#[test]
fn test_encrypt_inverts_decrypt_for_cipher_output() {
    let cipher = SimpleCipher::default();
    let ciphertext = cipher.encrypt("Welcome12#_");
    let plaintext = cipher.decrypt(&ciphertext).unwrap();
    assert_eq!(cipher.encrypt(&plaintext), ciphertext);
}

#[test]
fn test_empty_string_encrypts_to_empty_string() {
    let cipher = SimpleCipher::default();
    assert_eq!(cipher.encrypt(""), "");
    assert_eq!(cipher.decrypt("").unwrap(), "");
}

#[test]
fn test_ciphertext_is_xor_then_urlsafe_base64() {
    let cipher = SimpleCipher::default();
    let encrypted = cipher.encrypt("Welcome12#_");
    let raw = URL_SAFE.decode(&encrypted).unwrap();
    assert_eq!(raw, xor_cycle(b"Welcome12#_", DEFAULT_CIPHER_KEY.as_bytes()));
    assert_ne!(raw.as_slice(), b"Welcome12#_".as_slice());
    assert!(encrypted
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '='));
}

#[test]
fn test_different_keys_give_different_ciphertext() {
    let a = SimpleCipher::new("key-one").unwrap();
    let b = SimpleCipher::new("key-two").unwrap();
    assert_ne!(a.encrypt("same secret"), b.encrypt("same secret"));
}

#[test]
fn test_decrypt_rejects_invalid_base64() {
    let cipher = SimpleCipher::default();
    let result = cipher.decrypt("not base64 at all!!");
    assert!(matches!(result, Err(CipherError::Decode(_))));
}

#[test]
fn test_decrypt_rejects_non_utf8_plaintext() {
    let key = DEFAULT_CIPHER_KEY.as_bytes();
    // 0xFF is never valid UTF-8; pre-XOR it so decrypt yields it back
    let ciphertext = URL_SAFE.encode(xor_cycle(&[0xFF], key));
    let result = SimpleCipher::default().decrypt(&ciphertext);
    assert!(matches!(result, Err(CipherError::Utf8(_))));
}

#[test]
fn test_empty_key_is_rejected() {
    assert!(matches!(SimpleCipher::new(Vec::new()), Err(CipherError::EmptyKey)));
}
