//! Display-name resolution for raw recent-entry identifiers.
//!
//! Purely presentational: a raw identifier (package-qualified plugin URL,
//! content-browser path) is matched against two ordered tables of patterns —
//! "qualified" forms first, then bare path-like forms. The first matching
//! pattern formats the label from its capture groups; one group is returned
//! directly, two are joined with `:`. An identifier nothing matches is
//! returned unchanged — resolution never fails, at most it logs.

use lazy_static::lazy_static;
use regex::Regex;

/// One display-name rule: a pattern whose capture groups form the label.
#[derive(Debug, Clone)]
pub struct DisplayRule {
    name: &'static str,
    regex: Regex,
}

impl DisplayRule {
    /// Compile a rule. Returns an error string for an invalid pattern.
    pub fn new(name: &'static str, pattern: &str) -> Result<Self, String> {
        let regex =
            Regex::new(pattern).map_err(|e| format!("invalid display rule {name:?}: {e}"))?;
        Ok(Self { name, regex })
    }

    fn compile(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            regex: Regex::new(pattern).expect("built-in display rule must compile"),
        }
    }
}

lazy_static! {
    /// Built-in qualified patterns — identifier scoped to a named
    /// package/container. Checked in order; first match wins.
    static ref QUALIFIED_RULES: Vec<DisplayRule> = vec![
        // Versioned package URL: Vendor.Package.3:/scripts/file.cs
        DisplayRule::compile(
            "package-versioned",
            r"^(?:[A-Za-z0-9_]+\.)*([A-Za-z0-9_]+)\.\d+:(?:.*/)?([^/:]+)$",
        ),
        // Unversioned package URL: Vendor.Package:/scripts/file.cs
        DisplayRule::compile(
            "package-plain",
            r"^(?:[A-Za-z0-9_]+\.)*([A-Za-z0-9_]+):(?:.*/)?([^/:]+)$",
        ),
    ];

    /// Built-in bare patterns — plain path-like forms, tried only after every
    /// qualified pattern has failed.
    static ref BARE_RULES: Vec<DisplayRule> = vec![
        // Absolute path: /content/props/barrel.prefab
        DisplayRule::compile("absolute-path", r"^/(?:[^/]+/)*([^/]+)$"),
        // Relative path with at least one separator: props/barrel.prefab
        DisplayRule::compile("relative-path", r"^(?:[^/:]+/)+([^/]+)$"),
    ];
}

/// Maps raw identifiers to short human-readable labels. Stateless.
#[derive(Debug, Clone)]
pub struct DisplayNameResolver {
    qualified: Vec<DisplayRule>,
    bare: Vec<DisplayRule>,
}

impl Default for DisplayNameResolver {
    fn default() -> Self {
        Self {
            qualified: QUALIFIED_RULES.clone(),
            bare: BARE_RULES.clone(),
        }
    }
}

impl DisplayNameResolver {
    /// Resolver with custom pattern tables, e.g. for a feature whose
    /// identifiers are not plugin URLs.
    pub fn with_rules(qualified: Vec<DisplayRule>, bare: Vec<DisplayRule>) -> Self {
        Self { qualified, bare }
    }

    /// Resolve a raw identifier to a display label.
    /// Falls back to the raw identifier when no pattern matches.
    pub fn resolve(&self, raw: &str) -> String {
        for rule in self.qualified.iter().chain(self.bare.iter()) {
            let Some(caps) = rule.regex.captures(raw) else {
                continue;
            };
            match format_label(&caps) {
                Some(label) => return label,
                None => {
                    tracing::debug!(
                        "display rule {:?} matched {raw:?} without usable captures",
                        rule.name
                    );
                }
            }
        }
        tracing::debug!("no display rule matched {raw:?}; using raw identifier");
        raw.to_string()
    }
}

/// One capture group → the group itself; two → joined with `:`.
fn format_label(caps: &regex::Captures<'_>) -> Option<String> {
    match caps.len() {
        2 => caps.get(1).map(|g| g.as_str().to_string()),
        3 => match (caps.get(1), caps.get(2)) {
            (Some(a), Some(b)) => Some(format!("{}:{}", a.as_str(), b.as_str())),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versioned_package_url_joins_package_and_file() {
        let resolver = DisplayNameResolver::default();
        assert_eq!(resolver.resolve("Foo.Bar.3:/scripts/x.cs"), "Bar:x.cs");
    }

    #[test]
    fn unversioned_package_url_resolves() {
        let resolver = DisplayNameResolver::default();
        assert_eq!(
            resolver.resolve("Acme.Gadgets:/widgets/dial.lua"),
            "Gadgets:dial.lua"
        );
    }

    #[test]
    fn bare_paths_resolve_to_the_file_name() {
        let resolver = DisplayNameResolver::default();
        assert_eq!(
            resolver.resolve("/content/props/barrel.prefab"),
            "barrel.prefab"
        );
        assert_eq!(resolver.resolve("props/barrel.prefab"), "barrel.prefab");
    }

    #[test]
    fn qualified_rules_win_over_bare_rules() {
        // Contains both a package prefix and path separators; the qualified
        // table runs first, so the label keeps the package name.
        let resolver = DisplayNameResolver::default();
        assert_eq!(resolver.resolve("Pkg.1:/deep/nested/f.cs"), "Pkg:f.cs");
    }

    #[test]
    fn unmatched_identifier_falls_back_to_raw() {
        let resolver = DisplayNameResolver::default();
        assert_eq!(resolver.resolve("???"), "???");
        assert_eq!(resolver.resolve("plainword"), "plainword");
        assert_eq!(resolver.resolve(""), "");
    }

    #[test]
    fn single_capture_rules_return_the_group_directly() {
        let qualified = vec![DisplayRule::new("id-suffix", r"^urn:[a-z]+:(\w+)$").unwrap()];
        let resolver = DisplayNameResolver::with_rules(qualified, Vec::new());
        assert_eq!(resolver.resolve("urn:prefab:barrel"), "barrel");
        assert_eq!(resolver.resolve("no-match"), "no-match");
    }

    #[test]
    fn rules_are_tried_in_table_order() {
        let qualified = vec![
            DisplayRule::new("first", r"^(a+)").unwrap(),
            DisplayRule::new("second", r"^(a)").unwrap(),
        ];
        let resolver = DisplayNameResolver::with_rules(qualified, Vec::new());
        assert_eq!(resolver.resolve("aaab"), "aaa");
    }

    #[test]
    fn invalid_custom_pattern_reports_an_error() {
        assert!(DisplayRule::new("broken", "(unclosed").is_err());
    }
}
