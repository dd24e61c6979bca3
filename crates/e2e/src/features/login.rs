//! Login feature tests
//!
//! These use a guest driver: the shared worker session would defeat the
//! point of exercising the login form itself.

use swagshop_harness::timed;

use crate::error::E2eError;
use crate::fixtures::LOCKED_OUT_USER;
use crate::pages::LoginPage;
use crate::suite::{TestCase, TestContext, TestFuture};

pub fn tests() -> Vec<TestCase> {
    vec![
        TestCase {
            name: "valid credentials reach inventory",
            run: valid_credentials,
        },
        TestCase {
            name: "locked out user sees error banner",
            run: locked_out_user,
        },
        TestCase {
            name: "wrong password sees error banner",
            run: wrong_password,
        },
    ]
}

fn valid_credentials(ctx: &mut TestContext) -> TestFuture<'_> {
    Box::pin(async move {
        let guest = ctx.guest_driver()?;
        let login = LoginPage::new(&guest);
        // login() itself waits for the inventory list, so reaching Ok
        // means the redirect landed.
        timed(
            &mut ctx.logger,
            &mut ctx.stats,
            "sign in with valid credentials",
            ctx.slow_threshold,
            login.login(&ctx.fixtures.username, &ctx.fixtures.password),
        )
        .await?;
        ctx.stats.bump("logins");
        Ok(())
    })
}

fn locked_out_user(ctx: &mut TestContext) -> TestFuture<'_> {
    Box::pin(async move {
        let guest = ctx.guest_driver()?;
        let login = LoginPage::new(&guest);
        let banner = timed(
            &mut ctx.logger,
            &mut ctx.stats,
            "sign in as locked out user",
            ctx.slow_threshold,
            login.login_expecting_error(LOCKED_OUT_USER, &ctx.fixtures.password),
        )
        .await?;

        if !banner.contains("locked out") {
            return Err(E2eError::AssertionFailed(format!(
                "expected lockout message, banner was: {banner:?}"
            )));
        }
        Ok(())
    })
}

fn wrong_password(ctx: &mut TestContext) -> TestFuture<'_> {
    Box::pin(async move {
        let guest = ctx.guest_driver()?;
        let login = LoginPage::new(&guest);
        let banner = timed(
            &mut ctx.logger,
            &mut ctx.stats,
            "sign in with wrong password",
            ctx.slow_threshold,
            login.login_expecting_error(&ctx.fixtures.username, "definitely-wrong"),
        )
        .await?;

        if !banner.contains("do not match") {
            return Err(E2eError::AssertionFailed(format!(
                "expected mismatch message, banner was: {banner:?}"
            )));
        }
        Ok(())
    })
}
