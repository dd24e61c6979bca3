//! Authenticated session management
//!
//! The login is performed once per worker; every later driver script
//! reuses the saved storage state instead of signing in again. Each test
//! still gets a fresh page, since every script opens its own.

use std::path::Path;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{info, warn};

use crate::driver::{Driver, DriverConfig};
use crate::error::{E2eError, E2eResult};
use crate::fixtures::Fixtures;
use crate::pages::LoginPage;

const PROBE_ATTEMPTS: usize = 10;
const PROBE_INTERVAL: Duration = Duration::from_millis(500);

/// A logged-in browser session for one worker.
pub struct Session {
    driver: Driver,
}

impl Session {
    /// Probes the storefront, signs in once, and keeps the Playwright
    /// storage state under `state_dir` for every later script.
    pub async fn establish(
        config: &DriverConfig,
        fixtures: &Fixtures,
        state_dir: &Path,
    ) -> E2eResult<Self> {
        probe(&config.base_url).await?;

        std::fs::create_dir_all(state_dir)?;
        let mut config = config.clone();
        config.storage_state = Some(state_dir.join("storage-state.json"));

        let driver = Driver::new(config)?;
        LoginPage::new(&driver)
            .login(&fixtures.username, &fixtures.password)
            .await?;
        info!(user = %fixtures.username, "session established");

        Ok(Self { driver })
    }

    pub fn driver(&self) -> &Driver {
        &self.driver
    }

    pub fn into_driver(self) -> Driver {
        self.driver
    }
}

/// Cheap availability check before paying for browser startup.
async fn probe(base_url: &str) -> E2eResult<()> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(2))
        .build()?;

    let mut last_reason = String::new();
    for attempt in 1..=PROBE_ATTEMPTS {
        match client.get(base_url).send().await {
            Ok(resp) if resp.status().is_success() => return Ok(()),
            Ok(resp) => last_reason = format!("HTTP {}", resp.status()),
            Err(e) => last_reason = e.to_string(),
        }
        if attempt < PROBE_ATTEMPTS {
            warn!(attempt, reason = %last_reason, "storefront not reachable yet");
            sleep(PROBE_INTERVAL).await;
        }
    }

    Err(E2eError::SiteUnavailable {
        url: base_url.to_string(),
        reason: last_reason,
    })
}
