//! Registry loading from key/value listings.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use ethgaze_core::registry::{load_from_vars, parse_address, DEFAULT_ENV_PREFIX};
use ethgaze_core::EthGazeError;

// EIP-55 checksum test vector address.
const ALICE: &str = "0x52908400098527886E0F7030069857D2E4169EE7";

fn load(vars: &[(&str, &str)]) -> Result<Vec<ethgaze_core::registry::WatchTarget>, EthGazeError> {
    load_from_vars(vars.iter().copied(), DEFAULT_ENV_PREFIX)
}

#[test]
fn picks_valid_entries_and_skips_the_rest() {
    let vars = [
        ("ethaddr_alice", ALICE),
        ("ethaddr_bob", "not-an-address"),
        ("OTHER_KEY", "x"),
    ];
    let targets = load(&vars).unwrap();
    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].name, "alice");
    assert_eq!(targets[0].address_text, ALICE);
}

#[test]
fn prefix_match_is_case_insensitive() {
    let vars = [("ETHADDR_Carol", ALICE)];
    let targets = load(&vars).unwrap();
    assert_eq!(targets[0].name, "Carol");
}

#[test]
fn value_is_trimmed_before_validation() {
    let vars = [("ethaddr_dave", "  0x52908400098527886E0F7030069857D2E4169EE7  ")];
    let targets = load(&vars).unwrap();
    assert_eq!(targets[0].address_text, ALICE);
}

#[test]
fn accepts_address_without_0x() {
    let vars = [("ethaddr_erin", "52908400098527886E0F7030069857D2E4169EE7")];
    let targets = load(&vars).unwrap();
    assert_eq!(targets[0].name, "erin");
}

#[test]
fn preserves_listing_order() {
    let vars = [
        ("ethaddr_first", "0x0000000000000000000000000000000000000001"),
        ("ethaddr_second", "0x0000000000000000000000000000000000000002"),
    ];
    let targets = load(&vars).unwrap();
    assert_eq!(targets[0].name, "first");
    assert_eq!(targets[1].name, "second");
}

#[test]
fn zero_valid_targets_is_a_config_error() {
    let err = load(&[("ethaddr_bob", "nope"), ("PATH", "/bin")]).expect_err("must fail");
    assert!(matches!(err, EthGazeError::Config(_)));
    assert!(err.is_fatal());
}

#[test]
fn address_syntax_is_exactly_40_hex_digits() {
    // 39 digits: rejected.
    assert!(parse_address("0x52908400098527886E0F7030069857D2E4169EE").is_none());
    // 41 digits: rejected.
    assert!(parse_address("0x52908400098527886E0F7030069857D2E4169EE70").is_none());
    // Non-hex character: rejected.
    assert!(parse_address("0x52908400098527886E0F7030069857D2E4169EEG").is_none());
    assert!(parse_address(ALICE).is_some());
}
