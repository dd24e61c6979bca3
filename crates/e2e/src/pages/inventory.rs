//! Inventory (product listing) page object

use crate::driver::{Action, Driver, DEFAULT_WAIT_TIMEOUT_MS};
use crate::error::{E2eError, E2eResult};

pub const PAGE_PATH: &str = "/inventory.html";
pub const INVENTORY_LIST: &str = ".inventory_list";
pub const ITEM_NAME: &str = ".inventory_item_name";
pub const ITEM_PRICE: &str = ".inventory_item_price";
pub const SORT_SELECT: &str = "[data-test=\"product-sort-container\"]";
pub const CART_BADGE: &str = ".shopping_cart_badge";
pub const CART_LINK: &str = ".shopping_cart_link";

/// Options of the product sort dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOption {
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
}

impl SortOption {
    /// The `<option>` value in the sort select.
    pub fn value(&self) -> &'static str {
        match self {
            SortOption::NameAsc => "az",
            SortOption::NameDesc => "za",
            SortOption::PriceAsc => "lohi",
            SortOption::PriceDesc => "hilo",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOption::NameAsc => "Name (A to Z)",
            SortOption::NameDesc => "Name (Z to A)",
            SortOption::PriceAsc => "Price (low to high)",
            SortOption::PriceDesc => "Price (high to low)",
        }
    }
}

/// The site derives its per-product control ids from the product name.
pub fn product_slug(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "-")
}

pub fn add_to_cart_button(product: &str) -> String {
    format!("[data-test=\"add-to-cart-{}\"]", product_slug(product))
}

pub fn remove_button(product: &str) -> String {
    format!("[data-test=\"remove-{}\"]", product_slug(product))
}

pub struct InventoryPage<'d> {
    driver: &'d Driver,
}

impl<'d> InventoryPage<'d> {
    pub fn new(driver: &'d Driver) -> Self {
        Self { driver }
    }

    fn open_actions() -> Vec<Action> {
        vec![Action::Navigate {
            path: PAGE_PATH.to_string(),
            wait_for: Some(INVENTORY_LIST.to_string()),
        }]
    }

    pub async fn wait_loaded(&self) -> E2eResult<()> {
        self.driver
            .run_unit("open inventory", &Self::open_actions())
            .await
    }

    /// Product names in display order.
    pub async fn item_names(&self) -> E2eResult<Vec<String>> {
        let mut actions = Self::open_actions();
        actions.push(Action::ReadTexts {
            selector: ITEM_NAME.to_string(),
        });
        self.driver.run_texts("read item names", &actions).await
    }

    /// Price labels (e.g. `$29.99`) in display order.
    pub async fn item_prices(&self) -> E2eResult<Vec<String>> {
        let mut actions = Self::open_actions();
        actions.push(Action::ReadTexts {
            selector: ITEM_PRICE.to_string(),
        });
        self.driver.run_texts("read item prices", &actions).await
    }

    /// Applies a sort option and returns the resulting name order.
    pub async fn sorted_item_names(&self, option: SortOption) -> E2eResult<Vec<String>> {
        let mut actions = Self::open_actions();
        actions.push(Action::SelectOption {
            selector: SORT_SELECT.to_string(),
            value: option.value().to_string(),
        });
        actions.push(Action::ReadTexts {
            selector: ITEM_NAME.to_string(),
        });
        self.driver
            .run_texts(&format!("sort by {}", option.label()), &actions)
            .await
    }

    /// Applies a sort option and returns the resulting price order.
    pub async fn sorted_item_prices(&self, option: SortOption) -> E2eResult<Vec<String>> {
        let mut actions = Self::open_actions();
        actions.push(Action::SelectOption {
            selector: SORT_SELECT.to_string(),
            value: option.value().to_string(),
        });
        actions.push(Action::ReadTexts {
            selector: ITEM_PRICE.to_string(),
        });
        self.driver
            .run_texts(&format!("sort by {}", option.label()), &actions)
            .await
    }

    pub async fn add_to_cart(&self, product: &str) -> E2eResult<()> {
        let mut actions = Self::open_actions();
        actions.push(Action::Click {
            selector: add_to_cart_button(product),
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
        });
        self.driver
            .run_unit(&format!("add '{product}' to cart"), &actions)
            .await
    }

    pub async fn remove_from_cart(&self, product: &str) -> E2eResult<()> {
        let mut actions = Self::open_actions();
        actions.push(Action::Click {
            selector: remove_button(product),
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
        });
        self.driver
            .run_unit(&format!("remove '{product}' from cart"), &actions)
            .await
    }

    /// Opens the cart through the header link.
    pub async fn open_cart(&self) -> E2eResult<()> {
        let mut actions = Self::open_actions();
        actions.push(Action::Click {
            selector: CART_LINK.to_string(),
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
        });
        actions.push(Action::WaitFor {
            selector: crate::pages::cart::CART_LIST.to_string(),
            state: Default::default(),
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
        });
        self.driver.run_unit("open cart", &actions).await
    }

    /// Number shown on the cart badge; 0 when the badge is absent.
    pub async fn cart_badge_count(&self) -> E2eResult<u64> {
        let mut actions = Self::open_actions();
        actions.push(Action::Count {
            selector: CART_BADGE.to_string(),
        });
        let matches = self.driver.run_count("count cart badge", &actions).await?;
        if matches == 0 {
            return Ok(0);
        }

        let mut actions = Self::open_actions();
        actions.push(Action::ReadText {
            selector: CART_BADGE.to_string(),
        });
        let text = self.driver.run_text("read cart badge", &actions).await?;
        text.trim().parse().map_err(|_| E2eError::Protocol {
            step: "read cart badge".to_string(),
            reason: format!("badge text is not a number: {text:?}"),
        })
    }
}
