//! Walkthrough configuration loaded from environment variables.

/// Demo configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `WIZARD_SERVICE` — service to select on the cards step (default: `"Sea Freight"`)
/// - `WIZARD_LOCALE` — optional locale prefix for the wizard route (e.g. `"ar"`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub service: String,
    pub locale: Option<String>,
}

impl DemoConfig {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            service: std::env::var("WIZARD_SERVICE")
                .unwrap_or_else(|_| "Sea Freight".to_string()),
            locale: std::env::var("WIZARD_LOCALE").ok().filter(|l| !l.is_empty()),
        }
    }

    /// Returns the wizard route, locale-prefixed when configured.
    pub fn start_route(&self) -> String {
        match &self.locale {
            Some(locale) => format!("/{locale}/quote"),
            None => "/quote".to_string(),
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            service: "Sea Freight".to_string(),
            locale: None,
        }
    }
}
