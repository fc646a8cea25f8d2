//! Fuzz target: address parsing
//!
//! 1. No panics on any input
//! 2. Accepted addresses round-trip through their hex form
//!
//! Run: cargo +nightly fuzz run fuzz_address_parse -- -max_len=128

#![no_main]
use libfuzzer_sys::fuzz_target;
use tws_crypto::{address_valid, Address};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let parsed = s.parse::<Address>();
        if let Ok(addr) = parsed {
            assert!(address_valid(s));
            assert_eq!(addr.to_hex(), s.to_ascii_lowercase());
        }
    }

    let _ = Address::from_slice(data);
});
