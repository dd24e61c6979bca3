//! Playwright subprocess driver
//!
//! Each browser interaction is rendered into a self-contained node
//! script, staged in a temp directory, and executed with `node`. The
//! script reports back as a single JSON line on stdout
//! (`{"success":true,"value":...}`) or stderr
//! (`{"success":false,"error":"...","stack":"..."}`).
//!
//! When a storage-state path is configured, every script launches its
//! browser context from that file (if present) and re-saves it on
//! success, so the authenticated session and the cart survive across
//! scripts within one worker.

use std::path::PathBuf;
use std::process::{Command as StdCommand, Stdio};

use serde::Deserialize;
use serde_json::Value;
use tokio::process::Command;
use tracing::debug;

use crate::error::{E2eError, E2eResult};

/// Default timeout for element waits and interactions.
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 5_000;

/// Timeout for full page navigations.
pub const NAVIGATION_TIMEOUT_MS: u64 = 15_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BrowserKind {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl BrowserKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BrowserKind::Chromium => "chromium",
            BrowserKind::Firefox => "firefox",
            BrowserKind::Webkit => "webkit",
        }
    }

    /// Lenient parse for CLI input; anything unrecognized is chromium.
    pub fn parse(name: &str) -> Self {
        match name {
            "firefox" => BrowserKind::Firefox,
            "webkit" => BrowserKind::Webkit,
            _ => BrowserKind::Chromium,
        }
    }
}

/// Configuration for the browser driver
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Base URL of the storefront under test
    pub base_url: String,

    pub browser: BrowserKind,
    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,

    /// Playwright storageState file shared by every script of one
    /// worker. None disables session reuse (fresh context per script).
    pub storage_state: Option<PathBuf>,

    /// Directory for screenshots taken by [`Action::Screenshot`]
    pub screenshot_dir: PathBuf,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.saucedemo.com".to_string(),
            browser: BrowserKind::Chromium,
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
            storage_state: None,
            screenshot_dir: PathBuf::from("test-results/screenshots"),
        }
    }
}

impl DriverConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("SWAGSHOP_BASE_URL") {
            if !url.is_empty() {
                config.base_url = url;
            }
        }
        config
    }
}

/// Element wait state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WaitState {
    #[default]
    Visible,
    Hidden,
}

impl WaitState {
    fn as_str(&self) -> &'static str {
        match self {
            WaitState::Visible => "visible",
            WaitState::Hidden => "hidden",
        }
    }
}

/// One browser interaction, rendered to Playwright calls.
///
/// The `Read*` and `Count` variants assign the script's `value` slot;
/// a script with several of them reports the last one.
#[derive(Debug, Clone)]
pub enum Action {
    /// Navigate to a path relative to the base URL
    Navigate {
        path: String,
        wait_for: Option<String>,
    },
    Click {
        selector: String,
        timeout_ms: u64,
    },
    Fill {
        selector: String,
        value: String,
    },
    SelectOption {
        selector: String,
        value: String,
    },
    WaitFor {
        selector: String,
        state: WaitState,
        timeout_ms: u64,
    },
    /// Capture the text content of the first match
    ReadText {
        selector: String,
    },
    /// Capture the text contents of every match, in DOM order
    ReadTexts {
        selector: String,
    },
    ReadAttribute {
        selector: String,
        name: String,
    },
    /// Capture how many elements match
    Count {
        selector: String,
    },
    Screenshot {
        name: String,
    },
}

impl Action {
    /// Short human-readable name, used in step error context.
    pub fn name(&self) -> String {
        match self {
            Action::Navigate { path, .. } => format!("navigate:{path}"),
            Action::Click { selector, .. } => format!("click:{selector}"),
            Action::Fill { selector, .. } => format!("fill:{selector}"),
            Action::SelectOption { selector, .. } => format!("select:{selector}"),
            Action::WaitFor { selector, .. } => format!("wait:{selector}"),
            Action::ReadText { selector } => format!("read_text:{selector}"),
            Action::ReadTexts { selector } => format!("read_texts:{selector}"),
            Action::ReadAttribute { selector, name } => {
                format!("read_attr:{selector}@{name}")
            }
            Action::Count { selector } => format!("count:{selector}"),
            Action::Screenshot { name } => format!("screenshot:{name}"),
        }
    }
}

/// Final JSON line printed by every generated script.
#[derive(Debug, Deserialize)]
struct ScriptReport {
    success: bool,
    #[serde(default)]
    value: Option<Value>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    stack: Option<String>,
}

/// Browser driver handle
pub struct Driver {
    config: DriverConfig,
}

impl Driver {
    pub fn new(config: DriverConfig) -> E2eResult<Self> {
        Self::check_playwright_installed()?;
        std::fs::create_dir_all(&config.screenshot_dir)?;
        Ok(Self { config })
    }

    /// Builds a driver without probing the Playwright installation.
    /// Script generation works; running scripts still needs node and
    /// playwright on the PATH.
    pub fn unchecked(config: DriverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Check if Playwright is installed
    fn check_playwright_installed() -> E2eResult<()> {
        let output = StdCommand::new("npx")
            .args(["playwright", "--version"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match output {
            Ok(status) if status.success() => Ok(()),
            _ => Err(E2eError::PlaywrightNotFound),
        }
    }

    /// Build the node script for a sequence of actions.
    pub fn build_script(&self, actions: &[Action]) -> String {
        let mut script = String::new();

        let storage = self
            .config
            .storage_state
            .as_ref()
            .filter(|p| p.exists())
            .map(|p| format!(",\n    storageState: '{}'", js_str(&p.to_string_lossy())))
            .unwrap_or_default();

        script.push_str(&format!(
            r#"const {{ chromium, firefox, webkit }} = require('playwright');

(async () => {{
  const browser = await {browser}.launch({{ headless: {headless} }});
  const context = await browser.newContext({{
    viewport: {{ width: {width}, height: {height} }}{storage}
  }});
  const page = await context.newPage();
  const baseUrl = '{base_url}';
  let value = null;

  try {{
"#,
            browser = self.config.browser.as_str(),
            headless = self.config.headless,
            width = self.config.viewport_width,
            height = self.config.viewport_height,
            base_url = js_str(&self.config.base_url),
        ));

        for (i, action) in actions.iter().enumerate() {
            script.push_str(&format!("    // Step {}: {}\n", i + 1, action.name()));
            script.push_str(&self.action_to_js(action));
            script.push('\n');
        }

        if let Some(state) = &self.config.storage_state {
            script.push_str(&format!(
                "    await context.storageState({{ path: '{}' }});\n",
                js_str(&state.to_string_lossy())
            ));
        }

        script.push_str(
            r#"    console.log(JSON.stringify({ success: true, value }));
  } catch (error) {
    console.error(JSON.stringify({ success: false, error: error.message, stack: error.stack }));
    process.exitCode = 1;
  } finally {
    await browser.close();
  }
})();
"#,
        );

        script
    }

    fn action_to_js(&self, action: &Action) -> String {
        match action {
            Action::Navigate { path, wait_for } => {
                let wait = wait_for
                    .as_ref()
                    .map(|s| {
                        format!(
                            "\n    await page.waitForSelector('{}', {{ timeout: {} }});",
                            js_str(s),
                            DEFAULT_WAIT_TIMEOUT_MS
                        )
                    })
                    .unwrap_or_default();
                format!(
                    "    await page.goto(baseUrl + '{}', {{ waitUntil: 'networkidle', timeout: {} }});{}",
                    js_str(path),
                    NAVIGATION_TIMEOUT_MS,
                    wait
                )
            }
            Action::Click {
                selector,
                timeout_ms,
            } => format!(
                "    await page.click('{}', {{ timeout: {} }});",
                js_str(selector),
                timeout_ms
            ),
            Action::Fill { selector, value } => format!(
                "    await page.fill('{}', '{}');",
                js_str(selector),
                js_str(value)
            ),
            Action::SelectOption { selector, value } => format!(
                "    await page.selectOption('{}', '{}');",
                js_str(selector),
                js_str(value)
            ),
            Action::WaitFor {
                selector,
                state,
                timeout_ms,
            } => format!(
                "    await page.waitForSelector('{}', {{ state: '{}', timeout: {} }});",
                js_str(selector),
                state.as_str(),
                timeout_ms
            ),
            Action::ReadText { selector } => format!(
                "    value = (await page.textContent('{}', {{ timeout: {} }})) ?? '';",
                js_str(selector),
                DEFAULT_WAIT_TIMEOUT_MS
            ),
            Action::ReadTexts { selector } => format!(
                "    value = await page.locator('{}').allTextContents();",
                js_str(selector)
            ),
            Action::ReadAttribute { selector, name } => format!(
                "    value = await page.getAttribute('{}', '{}');",
                js_str(selector),
                js_str(name)
            ),
            Action::Count { selector } => format!(
                "    value = await page.locator('{}').count();",
                js_str(selector)
            ),
            Action::Screenshot { name } => {
                let path = self.config.screenshot_dir.join(format!("{name}.png"));
                format!(
                    "    await page.screenshot({{ path: '{}' }});",
                    js_str(&path.to_string_lossy())
                )
            }
        }
    }

    /// Run a sequence of actions as one script, returning the captured
    /// value (JSON null when nothing was captured).
    pub async fn run(&self, step: &str, actions: &[Action]) -> E2eResult<Value> {
        let script = self.build_script(actions);

        let dir = tempfile::tempdir()?;
        let script_path = dir.path().join("step.js");
        std::fs::write(&script_path, &script)?;

        debug!(step, script = %script_path.display(), "running driver script");

        let output = Command::new("node")
            .arg(&script_path)
            .current_dir(dir.path())
            .output()
            .await?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        match parse_report(&stdout).or_else(|| parse_report(&stderr)) {
            Some(report) if report.success => Ok(report.value.unwrap_or(Value::Null)),
            Some(report) => Err(E2eError::StepFailed {
                step: step.to_string(),
                message: report.error.unwrap_or_else(|| "unknown error".to_string()),
                stack: report.stack.unwrap_or_default(),
            }),
            None => Err(E2eError::Protocol {
                step: step.to_string(),
                reason: format!("no report line\nstdout: {stdout}\nstderr: {stderr}"),
            }),
        }
    }

    /// Run for side effects only.
    pub async fn run_unit(&self, step: &str, actions: &[Action]) -> E2eResult<()> {
        self.run(step, actions).await.map(|_| ())
    }

    /// Run and capture a string value.
    pub async fn run_text(&self, step: &str, actions: &[Action]) -> E2eResult<String> {
        match self.run(step, actions).await? {
            Value::String(s) => Ok(s),
            Value::Null => Ok(String::new()),
            other => Err(E2eError::Protocol {
                step: step.to_string(),
                reason: format!("expected string capture, got {other}"),
            }),
        }
    }

    /// Run and capture a list of strings.
    pub async fn run_texts(&self, step: &str, actions: &[Action]) -> E2eResult<Vec<String>> {
        let value = self.run(step, actions).await?;
        serde_json::from_value(value.clone()).map_err(|_| E2eError::Protocol {
            step: step.to_string(),
            reason: format!("expected string array capture, got {value}"),
        })
    }

    /// Run and capture an element count.
    pub async fn run_count(&self, step: &str, actions: &[Action]) -> E2eResult<u64> {
        match self.run(step, actions).await? {
            Value::Number(n) => n.as_u64().ok_or_else(|| E2eError::Protocol {
                step: step.to_string(),
                reason: format!("expected unsigned count, got {n}"),
            }),
            other => Err(E2eError::Protocol {
                step: step.to_string(),
                reason: format!("expected numeric capture, got {other}"),
            }),
        }
    }
}

/// Last parseable report line wins; Playwright chatter above it is
/// ignored.
fn parse_report(stream: &str) -> Option<ScriptReport> {
    stream
        .lines()
        .rev()
        .find_map(|line| serde_json::from_str::<ScriptReport>(line.trim()).ok())
}

/// Escape a Rust string into a single-quoted JS string literal body.
fn js_str(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'").replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver() -> Driver {
        Driver::unchecked(DriverConfig::default())
    }

    #[test]
    fn script_wraps_actions_in_session_boilerplate() {
        let d = driver();
        let script = d.build_script(&[Action::Navigate {
            path: "/".to_string(),
            wait_for: Some("#login-button".to_string()),
        }]);

        assert!(script.contains("require('playwright')"));
        assert!(script.contains("chromium.launch({ headless: true })"));
        assert!(script.contains("viewport: { width: 1280, height: 720 }"));
        assert!(script.contains("const baseUrl = 'https://www.saucedemo.com';"));
        assert!(script.contains("await page.goto(baseUrl + '/', { waitUntil: 'networkidle', timeout: 15000 });"));
        assert!(script.contains("await page.waitForSelector('#login-button', { timeout: 5000 });"));
        assert!(script.contains(r#"console.log(JSON.stringify({ success: true, value }));"#));
        assert!(script.contains("await browser.close();"));
    }

    #[test]
    fn script_saves_storage_state_when_configured() {
        let mut d = driver();
        d.config.storage_state = Some(PathBuf::from("state/worker.json"));

        let script = d.build_script(&[Action::Click {
            selector: "#login-button".to_string(),
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
        }]);

        // File does not exist yet, so the context starts clean but the
        // state is still saved for the next script.
        assert!(!script.contains("storageState: 'state/worker.json'"));
        assert!(script.contains("await context.storageState({ path: 'state/worker.json' });"));
    }

    #[test]
    fn capture_actions_assign_the_value_slot() {
        let d = driver();
        let script = d.build_script(&[
            Action::ReadTexts {
                selector: ".inventory_item_name".to_string(),
            },
            Action::Count {
                selector: ".shopping_cart_badge".to_string(),
            },
        ]);

        assert!(script.contains("value = await page.locator('.inventory_item_name').allTextContents();"));
        assert!(script.contains("value = await page.locator('.shopping_cart_badge').count();"));
    }

    #[test]
    fn selectors_are_escaped_into_js_literals() {
        let d = driver();
        let script = d.build_script(&[Action::Fill {
            selector: "input[name='q']".to_string(),
            value: "it's fine".to_string(),
        }]);
        assert!(script.contains(r"await page.fill('input[name=\'q\']', 'it\'s fine');"));
    }

    #[test]
    fn report_parsing_takes_last_json_line() {
        let out = "npm warn something\n{\"success\":true,\"value\":[\"a\",\"b\"]}\n";
        let report = parse_report(out).unwrap();
        assert!(report.success);
        assert_eq!(report.value.unwrap(), serde_json::json!(["a", "b"]));

        let err = "{\"success\":false,\"error\":\"timeout\",\"stack\":\"at step.js:3\"}";
        let report = parse_report(err).unwrap();
        assert!(!report.success);
        assert_eq!(report.error.as_deref(), Some("timeout"));

        assert!(parse_report("plain chatter\n").is_none());
    }

    #[test]
    fn screenshots_land_in_the_configured_dir() {
        let d = driver();
        let script = d.build_script(&[
            Action::Screenshot {
                name: "inventory-after-sort".to_string(),
            },
            Action::ReadAttribute {
                selector: ".inventory_item_img img".to_string(),
                name: "alt".to_string(),
            },
        ]);
        assert!(script
            .contains("page.screenshot({ path: 'test-results/screenshots/inventory-after-sort.png' })"));
        assert!(script.contains("page.getAttribute('.inventory_item_img img', 'alt')"));
    }

    #[test]
    fn base_url_comes_from_the_environment() {
        std::env::set_var("SWAGSHOP_BASE_URL", "http://localhost:4444");
        let config = DriverConfig::from_env();
        std::env::remove_var("SWAGSHOP_BASE_URL");
        assert_eq!(config.base_url, "http://localhost:4444");

        let config = DriverConfig::from_env();
        assert_eq!(config.base_url, "https://www.saucedemo.com");
    }

    #[test]
    fn action_names_are_stable() {
        let action = Action::ReadAttribute {
            selector: ".title".to_string(),
            name: "data-test".to_string(),
        };
        assert_eq!(action.name(), "read_attr:.title@data-test");
    }
}
