//! Feature test specifications
//!
//! Each module lists the tests of one storefront feature. The lists are
//! executed by the live-browser binary in `tests/browser.rs`; nothing
//! here runs under plain `cargo test`.

pub mod cart;
pub mod checkout;
pub mod login;
pub mod sorting;

use crate::suite::TestCase;

/// Every feature with its tests, in execution order.
pub fn all() -> Vec<(&'static str, Vec<TestCase>)> {
    vec![
        ("login", login::tests()),
        ("sorting", sorting::tests()),
        ("cart", cart::tests()),
        ("checkout", checkout::tests()),
    ]
}
