//! Page Object Model wrappers for the storefront
//!
//! Each page object translates selectors into named methods with fixed
//! wait/timeout values. Page objects never assert; they wait, act, and
//! read, leaving verdicts to the feature tests.
//!
//! One method call is one driver script: the authenticated session and
//! the cart carry across calls through the driver's storage state.

pub mod cart;
pub mod checkout;
pub mod inventory;
pub mod login;

pub use cart::CartPage;
pub use checkout::CheckoutPage;
pub use inventory::{InventoryPage, SortOption};
pub use login::LoginPage;
