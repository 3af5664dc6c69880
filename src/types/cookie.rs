use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Browser cookie as persisted in the session file.
///
/// Keys follow the DevTools cookie shape (`httpOnly`, `sameSite`, ...) so files
/// written by other automation tools load unchanged. Keys not modelled here are
/// kept in `extra` and written back verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredCookie {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default = "default_path")]
    pub path: String,
    /// Seconds since the epoch; `-1` (or any non-positive value) marks a session cookie.
    #[serde(default = "session_expiry")]
    pub expires: f64,
    #[serde(default)]
    pub http_only: bool,
    #[serde(default)]
    pub secure: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub same_site: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_path() -> String {
    "/".to_string()
}

fn session_expiry() -> f64 {
    -1.0
}

impl StoredCookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: domain.into(),
            path: default_path(),
            expires: session_expiry(),
            http_only: false,
            secure: false,
            same_site: None,
            extra: Map::new(),
        }
    }

    pub fn is_session_cookie(&self) -> bool {
        self.expires <= 0.0
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        if self.is_session_cookie() {
            return None;
        }
        DateTime::from_timestamp(self.expires.trunc() as i64, 0)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|at| at <= now)
    }

    /// Subset of fields accepted by `Network.setCookies`.
    pub fn to_cookie_param_value(&self) -> Value {
        let mut param = json!({
            "name": self.name,
            "value": self.value,
            "domain": self.domain,
            "path": self.path,
            "secure": self.secure,
            "httpOnly": self.http_only,
        });
        if !self.is_session_cookie() {
            param["expires"] = json!(self.expires);
        }
        if let Some(same_site) = self
            .same_site
            .as_deref()
            .filter(|s| matches!(*s, "Strict" | "Lax" | "None"))
        {
            param["sameSite"] = json!(same_site);
        }
        param
    }
}

/// Credential state of one authenticated identity. Replaced wholesale, never merged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Session {
    pub cookies: Vec<StoredCookie>,
}

impl Session {
    pub fn new(cookies: Vec<StoredCookie>) -> Self {
        Self { cookies }
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    pub fn expired_count(&self, now: DateTime<Utc>) -> usize {
        self.cookies.iter().filter(|c| c.is_expired(now)).count()
    }
}
