//! Browser layer for the Swag Labs storefront suite
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ SuiteRunner (suite.rs)                                   │
//! │   rotate old run logs ── swagshop-harness                │
//! │   open RunLogger, establish Session (one login/worker)   │
//! │   for each TestCase: timed(..) around every interaction  │
//! │   flush RunStats, write <feature>_results.json           │
//! ├──────────────────────────────────────────────────────────┤
//! │ pages/ (Page Object Model)                               │
//! │   LoginPage · InventoryPage · CartPage · CheckoutPage    │
//! ├──────────────────────────────────────────────────────────┤
//! │ Driver (driver.rs)                                       │
//! │   Action list -> node script -> JSON report line         │
//! │   storage state keeps the session across scripts         │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The live-browser entry point is `tests/browser.rs` (`harness =
//! false`); it needs node, Playwright, and the storefront to be
//! reachable. Everything below the driver boundary is testable without
//! a browser.

pub mod driver;
pub mod error;
pub mod features;
pub mod fixtures;
pub mod pages;
pub mod session;
pub mod suite;

pub use driver::{Action, BrowserKind, Driver, DriverConfig};
pub use error::{E2eError, E2eResult};
pub use fixtures::Fixtures;
pub use session::Session;
pub use suite::{SuiteConfig, SuiteResult, SuiteRunner, TestCase, TestContext};
