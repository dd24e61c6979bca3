//! Environment-derived test fixtures

use std::env;

/// Account the storefront keeps permanently locked out, used by the
/// login feature.
pub const LOCKED_OUT_USER: &str = "locked_out_user";

/// Credentials and the product the cart/checkout features exercise.
#[derive(Debug, Clone)]
pub struct Fixtures {
    pub username: String,
    pub password: String,
    pub product: String,
}

impl Default for Fixtures {
    fn default() -> Self {
        Self {
            username: "standard_user".to_string(),
            password: "secret_sauce".to_string(),
            product: "Sauce Labs Backpack".to_string(),
        }
    }
}

impl Fixtures {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        let mut fixtures = Self::default();
        if let Some(user) = non_empty(env::var("SWAGSHOP_USER")) {
            fixtures.username = user;
        }
        if let Some(password) = non_empty(env::var("SWAGSHOP_PASSWORD")) {
            fixtures.password = password;
        }
        if let Some(product) = non_empty(env::var("SWAGSHOP_PRODUCT")) {
            fixtures.product = product;
        }
        fixtures
    }
}

fn non_empty(var: Result<String, env::VarError>) -> Option<String> {
    var.ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_the_demo_store() {
        let fixtures = Fixtures::default();
        assert_eq!(fixtures.username, "standard_user");
        assert_eq!(fixtures.product, "Sauce Labs Backpack");
    }
}
