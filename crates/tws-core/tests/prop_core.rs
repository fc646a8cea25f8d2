// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// PROPERTY-BASED TESTS - tws-core
//
// Verifies transaction invariants:
// - the signing hash depends on raw data only, never on signatures
// - a payload survives the skeleton's hex transport unchanged
// - a signature made over the signing hash verifies after transport
//
// Run: cargo test --release -p tws-core --test prop_core
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use proptest::prelude::*;
use tws_core::{
    account_create_contract, transfer_contract, vote_witness_contract, witness_create_contract,
    AccountType, Contract, Transaction,
};
use tws_crypto::{Address, KeyPair};

fn arb_address() -> impl Strategy<Value = Address> {
    prop::array::uniform20(any::<u8>()).prop_map(|b| Address::from_slice(&b).unwrap())
}

fn arb_contract() -> impl Strategy<Value = Contract> {
    prop_oneof![
        (arb_address(), arb_address(), 1i64..i64::MAX)
            .prop_map(|(o, t, a)| transfer_contract(&o, &t, a).into()),
        (arb_address(), prop::collection::vec(any::<u8>(), 0..32))
            .prop_map(|(a, n)| account_create_contract(AccountType::Normal, &n, &a).into()),
        (arb_address(), "[a-z:/.]{0,40}")
            .prop_map(|(o, u)| witness_create_contract(&o, u.as_bytes()).into()),
        (arb_address(), arb_address(), 1i32..1_000_000)
            .prop_map(|(o, w, c)| vote_witness_contract(&o, &w, c).into()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// PROPERTY: appending signatures never changes the signing hash
    #[test]
    fn prop_signing_hash_ignores_signatures(
        contract in arb_contract(),
        ts in 0i64..4_000_000_000_000,
        sigs in prop::collection::vec(prop::collection::vec(any::<u8>(), 65), 1..4),
    ) {
        let mut tx = Transaction::unsigned(&contract, ts);
        let before = tx.signing_hash();
        for sig in &sigs {
            tx.add_signature(sig);
        }
        prop_assert_eq!(tx.signing_hash(), before);
    }

    /// PROPERTY: hex transport preserves the payload and contract type
    #[test]
    fn prop_hex_transport_preserves_contract(contract in arb_contract(), ts in 0i64..i64::MAX) {
        let tx = Transaction::unsigned(&contract, ts);
        let back = Transaction::from_hex(&tx.to_hex()).unwrap();
        prop_assert_eq!(back.contract_type(), Some(contract.contract_type()));
        prop_assert_eq!(back.contract().unwrap(), contract);
    }

    /// PROPERTY: different timestamps give different signing hashes
    #[test]
    fn prop_timestamp_is_covered(contract in arb_contract(), a in 0i64..1_000_000, b in 0i64..1_000_000) {
        prop_assume!(a != b);
        prop_assert_ne!(
            Transaction::unsigned(&contract, a).signing_hash(),
            Transaction::unsigned(&contract, b).signing_hash()
        );
    }
}

#[test]
fn test_signature_survives_transport() {
    let keypair = KeyPair::generate();
    let contract: Contract = transfer_contract(&keypair.address(), &keypair.address(), 1).into();
    let mut tx = Transaction::unsigned(&contract, 1_700_000_000_000);
    let sig = keypair.sign_prehash(&tx.signing_hash()).unwrap();
    tx.add_signature(&sig);

    let back = Transaction::from_hex(&tx.to_hex()).unwrap();
    assert!(back.verify_signatures(keypair.public_key()));
    assert!(!back.verify_signatures(KeyPair::generate().public_key()));
}
