//! The skip-packages branching rule.

/// Services matching these keywords are quoted without per-package
/// details, so the form step submits directly and the packages step is
/// bypassed.
pub const DEFAULT_SKIP_KEYWORDS: &[&str] = &["warehousing", "customs", "consulting"];

/// Decides whether a selected service bypasses the packages step.
///
/// Matching is a case-insensitive substring check of each keyword against
/// the selected service name, so `"Warehousing Services"` matches the
/// `warehousing` keyword. The keyword set is configuration, not code:
/// construct with [`SkipPackagesPolicy::new`] to override it.
#[derive(Debug, Clone)]
pub struct SkipPackagesPolicy {
    keywords: Vec<String>,
}

impl SkipPackagesPolicy {
    /// Creates a policy with a custom keyword set.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.into().to_lowercase())
                .collect(),
        }
    }

    /// Returns true if the selected service bypasses the packages step.
    ///
    /// An empty selection never matches.
    pub fn skips_packages(&self, selected_option: &str) -> bool {
        if selected_option.is_empty() {
            return false;
        }
        let selected = selected_option.to_lowercase();
        self.keywords.iter().any(|keyword| selected.contains(keyword))
    }

    /// Returns the configured keywords.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl Default for SkipPackagesPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_SKIP_KEYWORDS.iter().copied())
    }
}
