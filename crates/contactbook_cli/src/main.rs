//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `contactbook_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("contactbook_core ping={}", contactbook_core::ping());
    println!(
        "contactbook_core version={}",
        contactbook_core::core_version()
    );
}
