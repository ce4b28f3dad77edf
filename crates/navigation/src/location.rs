//! Route locations: a path plus its query parameters.

use std::collections::BTreeMap;

use url::form_urlencoded;

/// A navigable location: a route path and its query parameters.
///
/// The wizard is one of potentially several stateful widgets on a page,
/// so every parameter edit goes through [`with_param`]/[`without_param`],
/// which leave unrelated parameters untouched.
///
/// [`with_param`]: RouteLocation::with_param
/// [`without_param`]: RouteLocation::without_param
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteLocation {
    path: String,
    query: BTreeMap<String, String>,
}

impl RouteLocation {
    /// Creates a location for a bare path with no query parameters.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: BTreeMap::new(),
        }
    }

    /// Parses a `path?query` string. Query pairs are percent-decoded;
    /// a duplicated key keeps its last value.
    pub fn parse(raw: &str) -> Self {
        let (path, query_str) = match raw.split_once('?') {
            Some((path, query)) => (path, query),
            None => (raw, ""),
        };

        let query = form_urlencoded::parse(query_str.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        Self {
            path: path.to_string(),
            query,
        }
    }

    /// Returns the route path, without query string.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the value of a query parameter, if present.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    /// Iterates over all query parameters in key order.
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.query.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns a copy with one parameter set; all others pass through.
    pub fn with_param(&self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.query.insert(name.into(), value.into());
        next
    }

    /// Returns a copy with one parameter removed; all others pass through.
    pub fn without_param(&self, name: &str) -> Self {
        let mut next = self.clone();
        next.query.remove(name);
        next
    }

    /// Returns a copy pointing at a different path, keeping the query.
    pub fn with_path(&self, path: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.path = path.into();
        next
    }

    /// Returns the locale prefix of the path, when present.
    ///
    /// A locale prefix is a leading two-letter alphabetic segment, as in
    /// `/ar/quote` or `/en/quote/summary`.
    pub fn locale_prefix(&self) -> Option<&str> {
        let first = self.path.trim_start_matches('/').split('/').next()?;
        (first.len() == 2 && first.chars().all(|c| c.is_ascii_alphabetic())).then_some(first)
    }
}

impl std::fmt::Display for RouteLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path)?;
        if !self.query.is_empty() {
            let encoded = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(self.query.iter())
                .finish();
            write!(f, "?{}", encoded)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bare_path() {
        let loc = RouteLocation::parse("/quote");
        assert_eq!(loc.path(), "/quote");
        assert_eq!(loc.params().count(), 0);
    }

    #[test]
    fn parse_extracts_query_parameters() {
        let loc = RouteLocation::parse("/quote?foo=bar&step=2");
        assert_eq!(loc.path(), "/quote");
        assert_eq!(loc.param("foo"), Some("bar"));
        assert_eq!(loc.param("step"), Some("2"));
    }

    #[test]
    fn parse_decodes_percent_encoded_values() {
        let loc = RouteLocation::parse("/quote?service=Air%20Freight");
        assert_eq!(loc.param("service"), Some("Air Freight"));
    }

    #[test]
    fn display_round_trips() {
        let loc = RouteLocation::parse("/quote?foo=bar&step=2");
        assert_eq!(RouteLocation::parse(&loc.to_string()), loc);
    }

    #[test]
    fn display_encodes_reserved_characters() {
        let loc = RouteLocation::new("/quote").with_param("service", "Air Freight");
        assert_eq!(loc.to_string(), "/quote?service=Air+Freight");
    }

    #[test]
    fn with_param_preserves_unrelated_parameters() {
        let loc = RouteLocation::parse("/quote?foo=bar").with_param("step", "3");
        assert_eq!(loc.param("foo"), Some("bar"));
        assert_eq!(loc.param("step"), Some("3"));
    }

    #[test]
    fn without_param_preserves_unrelated_parameters() {
        let loc = RouteLocation::parse("/quote?foo=bar&step=2").without_param("step");
        assert_eq!(loc.param("foo"), Some("bar"));
        assert_eq!(loc.param("step"), None);
    }

    #[test]
    fn with_path_keeps_query() {
        let loc = RouteLocation::parse("/quote?foo=bar").with_path("/quote/summary");
        assert_eq!(loc.path(), "/quote/summary");
        assert_eq!(loc.param("foo"), Some("bar"));
    }

    #[test]
    fn locale_prefix_detected() {
        assert_eq!(RouteLocation::new("/ar/quote").locale_prefix(), Some("ar"));
        assert_eq!(RouteLocation::new("/en/quote/summary").locale_prefix(), Some("en"));
    }

    #[test]
    fn locale_prefix_absent_for_plain_routes() {
        assert_eq!(RouteLocation::new("/quote").locale_prefix(), None);
        assert_eq!(RouteLocation::new("/").locale_prefix(), None);
        assert_eq!(RouteLocation::new("/a1/quote").locale_prefix(), None);
    }
}
