//! Wizard routing and timing configuration.

use std::time::Duration;

/// Routes and timing for one wizard instance.
#[derive(Debug, Clone)]
pub struct WizardConfig {
    /// Route of the wizard itself; a reset navigates here.
    pub base_path: String,

    /// Route of the terminal summary page.
    pub summary_path: String,

    /// How long interaction stays suppressed after a step navigation,
    /// so exit/enter animations can finish before input is re-enabled.
    pub transition_delay: Duration,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            base_path: "/quote".to_string(),
            summary_path: "/quote/summary".to_string(),
            transition_delay: Duration::from_millis(600),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_routes() {
        let config = WizardConfig::default();
        assert_eq!(config.base_path, "/quote");
        assert_eq!(config.summary_path, "/quote/summary");
        assert_eq!(config.transition_delay, Duration::from_millis(600));
    }
}
