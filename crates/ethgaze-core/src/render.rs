//! Exposition renderer.
//!
//! Pure function of one store snapshot: one line per metric per target in
//! registry order, then the aggregate lines. Deterministic, no I/O, never
//! fails; absent data renders as zeros. The optional metric-name prefix is
//! substituted literally.

use std::fmt::Write;

use crate::observation::{Observation, SweepStats};
use crate::registry::WatchTarget;

/// Failure placeholder balances render as zero.
fn balance_or_zero(s: &str) -> &str {
    if s.is_empty() { "0" } else { s }
}

/// Render the full exposition text for one snapshot.
///
/// `targets` and `observations` are positionally paired; the registry is
/// immutable for the process lifetime so the lengths always match.
pub fn render_exposition(
    prefix: &str,
    targets: &[WatchTarget],
    observations: &[Observation],
    stats: &SweepStats,
) -> String {
    let mut out = String::new();
    let mut contracts = 0usize;
    let mut eoas = 0usize;

    for (target, obs) in targets.iter().zip(observations) {
        let name = &target.name;
        let address = &target.address_text;

        let _ = writeln!(
            out,
            "{prefix}eth_balance{{name=\"{name}\",address=\"{address}\"}} {}",
            balance_or_zero(&obs.balance)
        );
        let _ = writeln!(
            out,
            "{prefix}eth_balance_pending{{name=\"{name}\",address=\"{address}\"}} {}",
            balance_or_zero(&obs.balance_pending)
        );
        let _ = writeln!(
            out,
            "{prefix}eth_nonce{{name=\"{name}\",address=\"{address}\"}} {}",
            obs.nonce
        );
        let _ = writeln!(
            out,
            "{prefix}eth_nonce_pending{{name=\"{name}\",address=\"{address}\"}} {}",
            obs.nonce_pending
        );
        if obs.is_contract {
            contracts += 1;
        } else {
            eoas += 1;
        }
        let _ = writeln!(
            out,
            "{prefix}eth_is_contract{{name=\"{name}\",address=\"{address}\"}} {}",
            if obs.is_contract { 1 } else { 0 }
        );
        let _ = writeln!(
            out,
            "{prefix}eth_code_size_bytes{{name=\"{name}\",address=\"{address}\"}} {}",
            obs.code_size
        );
        let _ = writeln!(
            out,
            "{prefix}eth_last_updated_unixtime{{name=\"{name}\",address=\"{address}\"}} {}",
            obs.last_updated
        );
    }

    let _ = writeln!(out, "{prefix}eth_contract_addresses_total {contracts}");
    let _ = writeln!(out, "{prefix}eth_eoa_addresses_total {eoas}");
    let _ = writeln!(out, "{prefix}eth_load_seconds {:.2}", stats.load_seconds);
    let _ = writeln!(out, "{prefix}eth_loaded_addresses {}", stats.loaded);
    let _ = writeln!(out, "{prefix}eth_total_addresses {}", targets.len());

    out
}
