pub mod account;
pub mod asset;
pub mod common;
pub mod tx;
pub mod wallet;
pub mod witness;
