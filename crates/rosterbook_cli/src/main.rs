//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `rosterbook_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use rosterbook_core::StudentStore;

fn main() {
    // A tiny probe keeps core wiring checkable without a UI shell attached.
    let store = StudentStore::new();
    println!("rosterbook_core version={}", rosterbook_core::core_version());
    println!("rosterbook_core empty_store_records={}", store.len());
}
