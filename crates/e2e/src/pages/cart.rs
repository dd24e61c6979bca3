//! Cart page object

use crate::driver::{Action, Driver, DEFAULT_WAIT_TIMEOUT_MS};
use crate::error::E2eResult;
use crate::pages::checkout::FIRST_NAME_INPUT;
use crate::pages::inventory::{remove_button, INVENTORY_LIST, ITEM_NAME};

pub const PAGE_PATH: &str = "/cart.html";
pub const CART_LIST: &str = ".cart_list";
pub const CHECKOUT_BUTTON: &str = "#checkout";
pub const CONTINUE_SHOPPING_BUTTON: &str = "#continue-shopping";

pub struct CartPage<'d> {
    driver: &'d Driver,
}

impl<'d> CartPage<'d> {
    pub fn new(driver: &'d Driver) -> Self {
        Self { driver }
    }

    fn open_actions() -> Vec<Action> {
        vec![Action::Navigate {
            path: PAGE_PATH.to_string(),
            wait_for: Some(CART_LIST.to_string()),
        }]
    }

    /// Names of the products currently in the cart.
    pub async fn item_names(&self) -> E2eResult<Vec<String>> {
        let mut actions = Self::open_actions();
        actions.push(Action::ReadTexts {
            selector: ITEM_NAME.to_string(),
        });
        self.driver.run_texts("read cart items", &actions).await
    }

    pub async fn remove(&self, product: &str) -> E2eResult<()> {
        let mut actions = Self::open_actions();
        actions.push(Action::Click {
            selector: remove_button(product),
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
        });
        self.driver
            .run_unit(&format!("remove '{product}' in cart"), &actions)
            .await
    }

    /// Proceeds to the customer information step.
    pub async fn begin_checkout(&self) -> E2eResult<()> {
        let mut actions = Self::open_actions();
        actions.push(Action::Click {
            selector: CHECKOUT_BUTTON.to_string(),
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
        });
        actions.push(Action::WaitFor {
            selector: FIRST_NAME_INPUT.to_string(),
            state: Default::default(),
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
        });
        self.driver.run_unit("begin checkout", &actions).await
    }

    /// Returns to the inventory page.
    pub async fn continue_shopping(&self) -> E2eResult<()> {
        let mut actions = Self::open_actions();
        actions.push(Action::Click {
            selector: CONTINUE_SHOPPING_BUTTON.to_string(),
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
        });
        actions.push(Action::WaitFor {
            selector: INVENTORY_LIST.to_string(),
            state: Default::default(),
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
        });
        self.driver.run_unit("continue shopping", &actions).await
    }
}
