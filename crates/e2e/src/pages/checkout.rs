//! Checkout flow page object: customer information, overview, completion

use crate::driver::{Action, Driver, DEFAULT_WAIT_TIMEOUT_MS};
use crate::error::E2eResult;
use crate::pages::inventory::{INVENTORY_LIST, ITEM_NAME};

pub const INFO_PATH: &str = "/checkout-step-one.html";
pub const OVERVIEW_PATH: &str = "/checkout-step-two.html";

pub const FIRST_NAME_INPUT: &str = "#first-name";
pub const LAST_NAME_INPUT: &str = "#last-name";
pub const POSTAL_CODE_INPUT: &str = "#postal-code";
pub const CONTINUE_BUTTON: &str = "#continue";
pub const CANCEL_BUTTON: &str = "#cancel";
pub const FINISH_BUTTON: &str = "#finish";
pub const OVERVIEW_LIST: &str = ".cart_list";
pub const SUMMARY_TOTAL: &str = ".summary_total_label";
pub const COMPLETE_HEADER: &str = ".complete-header";

pub struct CheckoutPage<'d> {
    driver: &'d Driver,
}

impl<'d> CheckoutPage<'d> {
    pub fn new(driver: &'d Driver) -> Self {
        Self { driver }
    }

    /// Fills the customer information step and continues to the
    /// overview.
    pub async fn fill_information(&self, first: &str, last: &str, zip: &str) -> E2eResult<()> {
        let actions = vec![
            Action::Navigate {
                path: INFO_PATH.to_string(),
                wait_for: Some(FIRST_NAME_INPUT.to_string()),
            },
            Action::Fill {
                selector: FIRST_NAME_INPUT.to_string(),
                value: first.to_string(),
            },
            Action::Fill {
                selector: LAST_NAME_INPUT.to_string(),
                value: last.to_string(),
            },
            Action::Fill {
                selector: POSTAL_CODE_INPUT.to_string(),
                value: zip.to_string(),
            },
            Action::Click {
                selector: CONTINUE_BUTTON.to_string(),
                timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            },
            Action::WaitFor {
                selector: OVERVIEW_LIST.to_string(),
                state: Default::default(),
                timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            },
        ];
        self.driver.run_unit("fill customer information", &actions).await
    }

    fn overview_actions() -> Vec<Action> {
        vec![Action::Navigate {
            path: OVERVIEW_PATH.to_string(),
            wait_for: Some(OVERVIEW_LIST.to_string()),
        }]
    }

    /// Product names listed on the order overview.
    pub async fn overview_item_names(&self) -> E2eResult<Vec<String>> {
        let mut actions = Self::overview_actions();
        actions.push(Action::ReadTexts {
            selector: ITEM_NAME.to_string(),
        });
        self.driver.run_texts("read overview items", &actions).await
    }

    /// The `Total: $..` label on the overview.
    pub async fn total_label(&self) -> E2eResult<String> {
        let mut actions = Self::overview_actions();
        actions.push(Action::ReadText {
            selector: SUMMARY_TOTAL.to_string(),
        });
        self.driver.run_text("read order total", &actions).await
    }

    /// Places the order and returns the completion header text.
    pub async fn finish(&self) -> E2eResult<String> {
        let mut actions = Self::overview_actions();
        actions.push(Action::Click {
            selector: FINISH_BUTTON.to_string(),
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
        });
        actions.push(Action::WaitFor {
            selector: COMPLETE_HEADER.to_string(),
            state: Default::default(),
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
        });
        actions.push(Action::ReadText {
            selector: COMPLETE_HEADER.to_string(),
        });
        self.driver.run_text("finish order", &actions).await
    }

    /// Abandons the overview and returns to the inventory.
    pub async fn cancel(&self) -> E2eResult<()> {
        let mut actions = Self::overview_actions();
        actions.push(Action::Click {
            selector: CANCEL_BUTTON.to_string(),
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
        });
        actions.push(Action::WaitFor {
            selector: INVENTORY_LIST.to_string(),
            state: Default::default(),
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
        });
        self.driver.run_unit("cancel checkout", &actions).await
    }
}
