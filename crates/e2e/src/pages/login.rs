//! Login page object

use crate::driver::{Action, Driver, DEFAULT_WAIT_TIMEOUT_MS};
use crate::error::E2eResult;
use crate::pages::inventory::INVENTORY_LIST;

pub const USERNAME_INPUT: &str = "#user-name";
pub const PASSWORD_INPUT: &str = "#password";
pub const LOGIN_BUTTON: &str = "#login-button";
pub const ERROR_BANNER: &str = "[data-test=\"error\"]";

pub struct LoginPage<'d> {
    driver: &'d Driver,
}

impl<'d> LoginPage<'d> {
    pub fn new(driver: &'d Driver) -> Self {
        Self { driver }
    }

    fn credential_actions(user: &str, password: &str) -> Vec<Action> {
        vec![
            Action::Navigate {
                path: "/".to_string(),
                wait_for: Some(LOGIN_BUTTON.to_string()),
            },
            Action::Fill {
                selector: USERNAME_INPUT.to_string(),
                value: user.to_string(),
            },
            Action::Fill {
                selector: PASSWORD_INPUT.to_string(),
                value: password.to_string(),
            },
            Action::Click {
                selector: LOGIN_BUTTON.to_string(),
                timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            },
        ]
    }

    /// Signs in and waits until the inventory page has loaded.
    pub async fn login(&self, user: &str, password: &str) -> E2eResult<()> {
        let mut actions = Self::credential_actions(user, password);
        actions.push(Action::WaitFor {
            selector: INVENTORY_LIST.to_string(),
            state: Default::default(),
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
        });
        self.driver.run_unit("login", &actions).await
    }

    /// Attempts to sign in and returns the error banner text.
    pub async fn login_expecting_error(&self, user: &str, password: &str) -> E2eResult<String> {
        let mut actions = Self::credential_actions(user, password);
        actions.push(Action::WaitFor {
            selector: ERROR_BANNER.to_string(),
            state: Default::default(),
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
        });
        actions.push(Action::ReadText {
            selector: ERROR_BANNER.to_string(),
        });
        self.driver.run_text("login error banner", &actions).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_actions_fill_then_submit() {
        let actions = LoginPage::credential_actions("standard_user", "secret_sauce");
        assert_eq!(actions.len(), 4);
        assert_eq!(actions[0].name(), "navigate:/");
        assert_eq!(actions[1].name(), "fill:#user-name");
        assert_eq!(actions[2].name(), "fill:#password");
        assert_eq!(actions[3].name(), "click:#login-button");
    }
}
