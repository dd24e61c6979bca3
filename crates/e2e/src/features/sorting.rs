//! Inventory sorting feature tests
//!
//! The oracle is a Rust-side sorted copy of whatever the page displays;
//! the test only checks ordering, not the catalog contents.

use swagshop_harness::timed;

use crate::error::{E2eError, E2eResult};
use crate::pages::{InventoryPage, SortOption};
use crate::suite::{TestCase, TestContext, TestFuture};

pub fn tests() -> Vec<TestCase> {
    vec![
        TestCase {
            name: "sort by name ascending",
            run: name_asc,
        },
        TestCase {
            name: "sort by name descending",
            run: name_desc,
        },
        TestCase {
            name: "sort by price ascending",
            run: price_asc,
        },
        TestCase {
            name: "sort by price descending",
            run: price_desc,
        },
    ]
}

fn name_asc(ctx: &mut TestContext) -> TestFuture<'_> {
    Box::pin(check_name_order(ctx, SortOption::NameAsc))
}

fn name_desc(ctx: &mut TestContext) -> TestFuture<'_> {
    Box::pin(check_name_order(ctx, SortOption::NameDesc))
}

fn price_asc(ctx: &mut TestContext) -> TestFuture<'_> {
    Box::pin(check_price_order(ctx, SortOption::PriceAsc))
}

fn price_desc(ctx: &mut TestContext) -> TestFuture<'_> {
    Box::pin(check_price_order(ctx, SortOption::PriceDesc))
}

async fn check_name_order(ctx: &mut TestContext, option: SortOption) -> E2eResult<()> {
    let inventory = InventoryPage::new(&ctx.driver);
    let names = timed(
        &mut ctx.logger,
        &mut ctx.stats,
        &format!("apply sort: {}", option.label()),
        ctx.slow_threshold,
        inventory.sorted_item_names(option),
    )
    .await?;

    expect_sorted_names(&names, option == SortOption::NameDesc)?;
    ctx.stats.bump("sort_checks");
    Ok(())
}

async fn check_price_order(ctx: &mut TestContext, option: SortOption) -> E2eResult<()> {
    let inventory = InventoryPage::new(&ctx.driver);
    let labels = timed(
        &mut ctx.logger,
        &mut ctx.stats,
        &format!("apply sort: {}", option.label()),
        ctx.slow_threshold,
        inventory.sorted_item_prices(option),
    )
    .await?;

    expect_sorted_prices(&labels, option == SortOption::PriceDesc)?;
    ctx.stats.bump("sort_checks");
    Ok(())
}

fn expect_sorted_names(names: &[String], descending: bool) -> E2eResult<()> {
    if names.is_empty() {
        return Err(E2eError::AssertionFailed(
            "inventory showed no product names".to_string(),
        ));
    }
    let mut expected = names.to_vec();
    expected.sort();
    if descending {
        expected.reverse();
    }
    if names != expected.as_slice() {
        return Err(E2eError::AssertionFailed(format!(
            "names out of order, got {names:?}"
        )));
    }
    Ok(())
}

fn expect_sorted_prices(labels: &[String], descending: bool) -> E2eResult<()> {
    if labels.is_empty() {
        return Err(E2eError::AssertionFailed(
            "inventory showed no prices".to_string(),
        ));
    }
    let mut prices = Vec::with_capacity(labels.len());
    for label in labels {
        prices.push(parse_price(label).ok_or_else(|| {
            E2eError::AssertionFailed(format!("unparseable price label: {label:?}"))
        })?);
    }
    let mut expected = prices.clone();
    expected.sort_by(f64::total_cmp);
    if descending {
        expected.reverse();
    }
    if prices != expected {
        return Err(E2eError::AssertionFailed(format!(
            "prices out of order, got {labels:?}"
        )));
    }
    Ok(())
}

/// `$29.99` -> 29.99
fn parse_price(label: &str) -> Option<f64> {
    label.trim().strip_prefix('$')?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn name_oracle_accepts_sorted_input() {
        let names = strs(&["Bolt T-Shirt", "Onesie", "Sauce Labs Backpack"]);
        assert!(expect_sorted_names(&names, false).is_ok());

        let mut reversed = names.clone();
        reversed.reverse();
        assert!(expect_sorted_names(&reversed, true).is_ok());
    }

    #[test]
    fn name_oracle_rejects_disorder() {
        let names = strs(&["Onesie", "Bolt T-Shirt"]);
        assert!(matches!(
            expect_sorted_names(&names, false),
            Err(E2eError::AssertionFailed(_))
        ));
        assert!(expect_sorted_names(&[], false).is_err());
    }

    #[test]
    fn price_oracle_parses_dollar_labels() {
        assert_eq!(parse_price("$29.99"), Some(29.99));
        assert_eq!(parse_price(" $7.99 "), Some(7.99));
        assert_eq!(parse_price("29.99"), None);
        assert_eq!(parse_price("$free"), None);
    }

    #[test]
    fn price_oracle_checks_numeric_order_not_lexical() {
        // Lexically "$15.99" < "$7.99"; numerically the reverse.
        let ascending = strs(&["$7.99", "$9.99", "$15.99"]);
        assert!(expect_sorted_prices(&ascending, false).is_ok());
        assert!(expect_sorted_prices(&ascending, true).is_err());

        let descending = strs(&["$49.99", "$15.99", "$7.99"]);
        assert!(expect_sorted_prices(&descending, true).is_ok());
    }
}
