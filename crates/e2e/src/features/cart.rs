//! Cart feature tests
//!
//! Cart contents live in the shared session's storage state, so each
//! test cleans up after itself to keep the next one independent.

use swagshop_harness::timed;

use crate::error::{E2eError, E2eResult};
use crate::pages::{CartPage, InventoryPage};
use crate::suite::{TestCase, TestContext, TestFuture};

pub fn tests() -> Vec<TestCase> {
    vec![
        TestCase {
            name: "added product shows up in cart",
            run: add_product,
        },
        TestCase {
            name: "removing the product clears the badge",
            run: remove_product,
        },
        TestCase {
            name: "continue shopping returns to inventory",
            run: continue_shopping,
        },
    ]
}

/// Warn (but do not fail) when an earlier test left items behind.
async fn note_leftover_items(ctx: &mut TestContext) -> E2eResult<()> {
    let inventory = InventoryPage::new(&ctx.driver);
    let badge = timed(
        &mut ctx.logger,
        &mut ctx.stats,
        "check cart badge before test",
        ctx.slow_threshold,
        inventory.cart_badge_count(),
    )
    .await?;
    if badge != 0 {
        ctx.stats.record_warning();
        ctx.logger
            .warning(format!("cart not empty at test start ({badge} items)"))?;
    }
    Ok(())
}

fn add_product(ctx: &mut TestContext) -> TestFuture<'_> {
    Box::pin(async move {
        note_leftover_items(ctx).await?;
        let product = ctx.fixtures.product.clone();

        let inventory = InventoryPage::new(&ctx.driver);
        timed(
            &mut ctx.logger,
            &mut ctx.stats,
            &format!("add '{product}' to cart"),
            ctx.slow_threshold,
            inventory.add_to_cart(&product),
        )
        .await?;
        ctx.stats.bump("products_added");

        let badge = timed(
            &mut ctx.logger,
            &mut ctx.stats,
            "read cart badge",
            ctx.slow_threshold,
            inventory.cart_badge_count(),
        )
        .await?;
        if badge != 1 {
            return Err(E2eError::AssertionFailed(format!(
                "expected cart badge 1, got {badge}"
            )));
        }

        let cart = CartPage::new(&ctx.driver);
        let items = timed(
            &mut ctx.logger,
            &mut ctx.stats,
            "list cart contents",
            ctx.slow_threshold,
            cart.item_names(),
        )
        .await?;
        if !items.iter().any(|name| name == &product) {
            return Err(E2eError::AssertionFailed(format!(
                "'{product}' missing from cart, got {items:?}"
            )));
        }

        // Leave the cart empty for the next test.
        timed(
            &mut ctx.logger,
            &mut ctx.stats,
            "clear cart",
            ctx.slow_threshold,
            cart.remove(&product),
        )
        .await
    })
}

fn remove_product(ctx: &mut TestContext) -> TestFuture<'_> {
    Box::pin(async move {
        let product = ctx.fixtures.product.clone();
        let inventory = InventoryPage::new(&ctx.driver);

        timed(
            &mut ctx.logger,
            &mut ctx.stats,
            &format!("add '{product}' to cart"),
            ctx.slow_threshold,
            inventory.add_to_cart(&product),
        )
        .await?;
        timed(
            &mut ctx.logger,
            &mut ctx.stats,
            &format!("remove '{product}' from cart"),
            ctx.slow_threshold,
            inventory.remove_from_cart(&product),
        )
        .await?;

        let badge = timed(
            &mut ctx.logger,
            &mut ctx.stats,
            "read cart badge",
            ctx.slow_threshold,
            inventory.cart_badge_count(),
        )
        .await?;
        if badge != 0 {
            return Err(E2eError::AssertionFailed(format!(
                "expected empty cart badge, got {badge}"
            )));
        }
        Ok(())
    })
}

fn continue_shopping(ctx: &mut TestContext) -> TestFuture<'_> {
    Box::pin(async move {
        let inventory = InventoryPage::new(&ctx.driver);
        timed(
            &mut ctx.logger,
            &mut ctx.stats,
            "open cart via header link",
            ctx.slow_threshold,
            inventory.open_cart(),
        )
        .await?;

        let cart = CartPage::new(&ctx.driver);
        // continue_shopping waits for the inventory list, so Ok means
        // the navigation landed.
        timed(
            &mut ctx.logger,
            &mut ctx.stats,
            "continue shopping from cart",
            ctx.slow_threshold,
            cart.continue_shopping(),
        )
        .await
    })
}
