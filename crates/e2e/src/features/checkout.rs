//! Checkout feature tests

use swagshop_harness::timed;

use crate::error::{E2eError, E2eResult};
use crate::pages::{CartPage, CheckoutPage, InventoryPage};
use crate::suite::{TestCase, TestContext, TestFuture};

const FIRST_NAME: &str = "Jane";
const LAST_NAME: &str = "Doe";
const POSTAL_CODE: &str = "94105";

pub fn tests() -> Vec<TestCase> {
    vec![
        TestCase {
            name: "full checkout completes an order",
            run: full_checkout,
        },
        TestCase {
            name: "cancelling the overview returns to inventory",
            run: cancel_checkout,
        },
    ]
}

/// Puts the fixture product in the cart and advances to the overview.
async fn reach_overview(ctx: &mut TestContext) -> E2eResult<()> {
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

    let cart = CartPage::new(&ctx.driver);
    timed(
        &mut ctx.logger,
        &mut ctx.stats,
        "begin checkout",
        ctx.slow_threshold,
        cart.begin_checkout(),
    )
    .await?;

    let checkout = CheckoutPage::new(&ctx.driver);
    timed(
        &mut ctx.logger,
        &mut ctx.stats,
        "fill customer information",
        ctx.slow_threshold,
        checkout.fill_information(FIRST_NAME, LAST_NAME, POSTAL_CODE),
    )
    .await
}

fn full_checkout(ctx: &mut TestContext) -> TestFuture<'_> {
    Box::pin(async move {
        reach_overview(ctx).await?;
        let product = ctx.fixtures.product.clone();

        let checkout = CheckoutPage::new(&ctx.driver);
        let items = timed(
            &mut ctx.logger,
            &mut ctx.stats,
            "read order overview",
            ctx.slow_threshold,
            checkout.overview_item_names(),
        )
        .await?;
        if !items.iter().any(|name| name == &product) {
            return Err(E2eError::AssertionFailed(format!(
                "'{product}' missing from overview, got {items:?}"
            )));
        }

        let total = timed(
            &mut ctx.logger,
            &mut ctx.stats,
            "read order total",
            ctx.slow_threshold,
            checkout.total_label(),
        )
        .await?;
        if !total.starts_with("Total:") {
            return Err(E2eError::AssertionFailed(format!(
                "unexpected total label: {total:?}"
            )));
        }

        let header = timed(
            &mut ctx.logger,
            &mut ctx.stats,
            "finish order",
            ctx.slow_threshold,
            checkout.finish(),
        )
        .await?;
        if !header.contains("Thank you") {
            return Err(E2eError::AssertionFailed(format!(
                "unexpected completion header: {header:?}"
            )));
        }

        ctx.stats.bump("orders_completed");
        Ok(())
    })
}

fn cancel_checkout(ctx: &mut TestContext) -> TestFuture<'_> {
    Box::pin(async move {
        reach_overview(ctx).await?;
        let product = ctx.fixtures.product.clone();

        let checkout = CheckoutPage::new(&ctx.driver);
        timed(
            &mut ctx.logger,
            &mut ctx.stats,
            "cancel at overview",
            ctx.slow_threshold,
            checkout.cancel(),
        )
        .await?;

        // Leave the cart empty for whoever runs next.
        let inventory = InventoryPage::new(&ctx.driver);
        timed(
            &mut ctx.logger,
            &mut ctx.stats,
            "clear cart",
            ctx.slow_threshold,
            inventory.remove_from_cart(&product),
        )
        .await
    })
}
