//! Runtime configuration.
//!
//! Layering (later wins):
//! - built-in defaults
//! - `UNTAPPD_*` environment variables (e.g. `UNTAPPD_SETTLE_MS=500`)
//! - bare `DATABASE_URL`

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const ENV_PREFIX: &str = "UNTAPPD_";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Checkin list of the tracked user.
    pub profile_url: Url,
    /// Navigated to only when the saved session is no longer valid.
    pub login_url: Url,
    /// Present on the profile page only for anonymous visitors.
    pub login_probe_selector: String,
    pub item_selector: String,
    /// Substring of the anchor text that loads the next batch of items.
    pub show_more_text: String,

    pub cookie_path: PathBuf,
    pub output_path: PathBuf,
    /// Forwarding to `merge_beer_log` is skipped when unset.
    pub database_url: Option<String>,

    pub loglevel: String,
    pub headless: bool,
    pub settle_ms: u64,
    pub login_timeout_secs: u64,
    pub export_concurrency: usize,
    /// Keep only the first digit run of the check-in count ("1,204" -> "1").
    pub legacy_checkin_count: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile_url: Url::parse("https://untappd.com/user/ryan_milkiewicz/beers")
                .expect("default profile url is valid"),
            login_url: Url::parse("https://untappd.com/login").expect("default login url is valid"),
            login_probe_selector: r#"a[href*="login"]"#.to_string(),
            item_selector: ".beer-item".to_string(),
            show_more_text: "Show More".to_string(),
            cookie_path: PathBuf::from("cookies.json"),
            output_path: PathBuf::from("beers.json"),
            database_url: None,
            loglevel: "info".to_string(),
            headless: false,
            settle_ms: 1000,
            login_timeout_secs: 1800,
            export_concurrency: 4,
            legacy_checkin_count: false,
        }
    }
}

impl Config {
    /// Build the configuration from defaults and the process environment.
    pub fn from_env() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Env::raw().only(&["DATABASE_URL"]))
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn login_timeout(&self) -> Duration {
        Duration::from_secs(self.login_timeout_secs)
    }

    pub fn export_concurrency(&self) -> usize {
        self.export_concurrency.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_without_environment() {
        Jail::expect_with(|_jail| {
            let cfg = Config::from_env()?;
            assert_eq!(cfg.settle(), Duration::from_secs(1));
            assert_eq!(cfg.item_selector, ".beer-item");
            assert_eq!(cfg.output_path, PathBuf::from("beers.json"));
            assert!(!cfg.legacy_checkin_count);
            Ok(())
        });
    }

    #[test]
    fn environment_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.set_env("UNTAPPD_SETTLE_MS", "250");
            jail.set_env("UNTAPPD_OUTPUT_PATH", "out/beers.json");
            jail.set_env("UNTAPPD_EXPORT_CONCURRENCY", "0");
            jail.set_env("DATABASE_URL", "postgres://localhost/beers");

            let cfg = Config::from_env()?;
            assert_eq!(cfg.settle(), Duration::from_millis(250));
            assert_eq!(cfg.output_path, PathBuf::from("out/beers.json"));
            assert_eq!(cfg.export_concurrency(), 1);
            assert_eq!(
                cfg.database_url.as_deref(),
                Some("postgres://localhost/beers")
            );
            Ok(())
        });
    }
}
