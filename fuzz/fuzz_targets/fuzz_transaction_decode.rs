//! Fuzz target: transaction skeleton decoding
//!
//! Skeletons come back from the ledger service, so decoding, hashing and
//! payload extraction must never panic on hostile bytes.
//!
//! Run: cargo +nightly fuzz run fuzz_transaction_decode -- -max_len=4096

#![no_main]
use libfuzzer_sys::fuzz_target;
use prost::Message;
use tws_core::Transaction;

fuzz_target!(|data: &[u8]| {
    if let Ok(tx) = Transaction::decode(data) {
        let _ = tx.signing_hash();
        let _ = tx.contract();
        let _ = tx.verify_signatures(&[0u8; 65]);
    }

    if let Ok(s) = std::str::from_utf8(data) {
        let _ = Transaction::from_hex(s);
    }
});
