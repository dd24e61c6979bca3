//! Live-browser suite entry point
//!
//! Run with: cargo test --package swagshop-e2e --test browser
//! Needs node + Playwright on the PATH and the storefront reachable.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use swagshop_e2e::driver::BrowserKind;
use swagshop_e2e::{features, DriverConfig, E2eResult, Fixtures, SuiteConfig, SuiteRunner};
use swagshop_harness::HarnessConfig;

#[derive(Parser, Debug)]
#[command(name = "swagshop-e2e")]
#[command(about = "Browser test suite for the Swag Labs demo storefront")]
struct Args {
    /// Storefront base URL (overrides SWAGSHOP_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Browser to use (chromium, firefox, webkit)
    #[arg(long, default_value = "chromium")]
    browser: String,

    /// Run with a visible browser window
    #[arg(long)]
    headed: bool,

    /// Run only this feature (login, sorting, cart, checkout)
    #[arg(short, long)]
    feature: Option<String>,

    /// Root directory for the three log tiers
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Output directory for result files
    #[arg(short, long, default_value = "test-results")]
    output: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("info".parse().expect("valid directive")),
        )
        .init();

    let args = Args::parse();

    let rt = tokio::runtime::Runtime::new().expect("failed to create tokio runtime");
    match rt.block_on(run(args)) {
        Ok(true) => std::process::exit(0),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    }
}

async fn run(args: Args) -> E2eResult<bool> {
    let mut harness = HarnessConfig::from_env();
    if let Some(dir) = args.log_dir {
        harness.log_root = dir;
    }

    let mut driver = DriverConfig::from_env();
    if let Some(url) = args.base_url {
        driver.base_url = url;
    }
    driver.browser = BrowserKind::parse(&args.browser);
    driver.headless = !args.headed;

    let config = SuiteConfig {
        harness,
        driver,
        fixtures: Fixtures::from_env(),
        output_dir: args.output,
    };
    let runner = SuiteRunner::new(config);

    let mut all_passed = true;
    for (feature, tests) in features::all() {
        if let Some(only) = &args.feature {
            if feature != only.as_str() {
                continue;
            }
        }
        let result = runner.run_feature(feature, &tests).await?;
        all_passed &= result.failed == 0;
    }

    Ok(all_passed)
}
