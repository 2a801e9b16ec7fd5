//! Client Configuration
//!
//! Where the API lives, which language to speak, and drag tuning.
//! Values come from compile-time env vars (`TODO_API_ORIGIN`, `TODO_LOCALE`),
//! then the page itself, then defaults.

use crate::i18n::{Locale, Messages};

/// Fallback origin when neither the build nor the page provides one
pub const DEFAULT_ORIGIN: &str = "http://localhost:8080";

/// Maximum midpoint distance (px) at which a dragged item moves
pub const DROP_THRESHOLD_PX: f64 = 50.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Scheme + host + port, no trailing slash
    pub api_origin: String,
    pub locale: Locale,
    pub drop_threshold_px: f64,
}

impl ClientConfig {
    pub fn new(api_origin: &str, locale: Locale) -> Self {
        Self {
            api_origin: api_origin.trim_end_matches('/').to_string(),
            locale,
            drop_threshold_px: DROP_THRESHOLD_PX,
        }
    }

    /// Resolve from build env, then `window.location.origin`, then defaults
    pub fn load() -> Self {
        let origin = option_env!("TODO_API_ORIGIN")
            .map(str::to_string)
            .or_else(page_origin)
            .unwrap_or_else(|| DEFAULT_ORIGIN.to_string());
        let locale = option_env!("TODO_LOCALE").map(Locale::parse).unwrap_or_default();
        Self::new(&origin, locale)
    }

    /// URL of a `/tasks/<route>` endpoint
    pub fn tasks_route(&self, route: &str) -> String {
        format!("{}/tasks/{}", self.api_origin, route)
    }

    /// The board page itself
    pub fn board_page(&self) -> String {
        self.tasks_route("")
    }

    pub fn login_url(&self) -> String {
        format!("{}/login", self.api_origin)
    }

    pub fn register_url(&self) -> String {
        format!("{}/register", self.api_origin)
    }

    pub fn messages(&self) -> &'static Messages {
        Messages::for_locale(self.locale)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ORIGIN, Locale::default())
    }
}

fn page_origin() -> Option<String> {
    let origin = web_sys::window()?.location().origin().ok()?;
    // file:// pages report "null"
    (origin.starts_with("http")).then_some(origin)
}

/// Is the page at `path` the board (as opposed to login/register)?
pub fn is_board_path(path: &str) -> bool {
    path.trim_start_matches('/').starts_with("tasks")
}
