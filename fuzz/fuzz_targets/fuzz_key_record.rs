//! Fuzz target: persisted key record decoding
//!
//! Feeds arbitrary bytes to the record codec. The wallet file is read from
//! disk before any password check, so every decode path must reject garbage
//! with an error instead of panicking.
//!
//! Run: cargo +nightly fuzz run fuzz_key_record -- -max_len=512

#![no_main]
use libfuzzer_sys::fuzz_target;
use tws_crypto::{decode, decode_public_only, encode, stored_verifier, EncryptedKeyRecord};

const PASSWORD: &str = "fuzz-password";

fuzz_target!(|data: &[u8]| {
    let _ = stored_verifier(data);
    let _ = decode_public_only(data);
    let _ = EncryptedKeyRecord::parse(data);

    // A record that fully decodes must re-encode to the same bytes (hex case aside)
    if let Ok(keypair) = decode(data, PASSWORD) {
        let again = encode(&keypair, PASSWORD).expect("decoded keypair re-encodes");
        assert!(again.eq_ignore_ascii_case(data), "decode → encode must be identity");
    }
});
