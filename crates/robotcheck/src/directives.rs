//! The structured result of parsing a robots.txt file.
//!
//! A [`DirectiveMap`] maps every declared user-agent to its [`RuleSet`] and
//! collects all sitemap URIs into one global set. It serializes with
//! [`facet_json`] to the shape below; `crawl-delay` is omitted when the
//! agent declared none.
//!
//! ```json
//! {
//!   "user-agent-groups": {
//!     "*": { "allow": [], "disallow": ["/private"] },
//!     "bot*": { "allow": ["/"], "disallow": [], "crawl-delay": 1.5 }
//!   },
//!   "sitemaps": ["https://example.com/map.xml"]
//! }
//! ```

use crate::grammar::RuleKind;
use facet::Facet;
use std::collections::BTreeMap;

/// Inserts `value` into a sorted, de-duplicated vector.
fn insert_unique(set: &mut Vec<String>, value: String) {
    if let Err(at) = set.binary_search(&value) {
        set.insert(at, value);
    }
}

/// The directives that apply to one user-agent.
///
/// `allow` and `disallow` behave as sets: they are kept sorted and never hold
/// the same pattern twice.
#[derive(Debug, Clone, Default, PartialEq, Facet)]
pub struct RuleSet {
    /// Path patterns the agent may crawl.
    pub allow: Vec<String>,

    /// Path patterns the agent may not crawl.
    pub disallow: Vec<String>,

    /// Seconds to wait between requests, if declared.
    #[facet(rename = "crawl-delay", skip_serializing_if = Option::is_none)]
    pub crawl_delay: Option<f64>,
}

impl RuleSet {
    /// Records a path pattern under the given rule kind.
    pub fn insert(&mut self, kind: RuleKind, pattern: String) {
        match kind {
            RuleKind::Allow => insert_unique(&mut self.allow, pattern),
            RuleKind::Disallow => insert_unique(&mut self.disallow, pattern),
        }
    }

    /// Returns the patterns recorded under the given rule kind.
    #[must_use]
    pub fn patterns(&self, kind: RuleKind) -> &[String] {
        match kind {
            RuleKind::Allow => &self.allow,
            RuleKind::Disallow => &self.disallow,
        }
    }

    /// Folds `other` into `self`. Patterns are unioned and a crawl-delay in
    /// `other` replaces the current one.
    pub fn merge(&mut self, other: &RuleSet) {
        for pattern in &other.allow {
            insert_unique(&mut self.allow, pattern.clone());
        }
        for pattern in &other.disallow {
            insert_unique(&mut self.disallow, pattern.clone());
        }
        if other.crawl_delay.is_some() {
            self.crawl_delay = other.crawl_delay;
        }
    }

    /// Returns `true` if no pattern and no crawl-delay is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.allow.is_empty() && self.disallow.is_empty() && self.crawl_delay.is_none()
    }
}

/// Everything a robots.txt file declares.
#[derive(Debug, Clone, Default, PartialEq, Facet)]
pub struct DirectiveMap {
    /// Rule sets keyed by user-agent, including the wildcard `*`.
    #[facet(rename = "user-agent-groups")]
    pub groups: BTreeMap<String, RuleSet>,

    /// Sitemap URIs, sorted and de-duplicated. Not scoped to any user-agent.
    pub sitemaps: Vec<String>,
}

impl DirectiveMap {
    /// Returns the rule set declared for `agent`, ignoring ASCII case.
    #[must_use]
    pub fn group(&self, agent: &str) -> Option<&RuleSet> {
        self.groups
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(agent))
            .map(|(_, rules)| rules)
    }

    /// Iterates over the declared user-agents in sorted order.
    pub fn agents(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Merges `rules` into the rule set for `agent`, creating it if needed.
    ///
    /// Agents are compared ASCII case-insensitively; the group keeps the
    /// spelling it was first declared with.
    pub fn merge_group(&mut self, agent: &str, rules: &RuleSet) {
        let key = self
            .groups
            .keys()
            .find(|key| key.eq_ignore_ascii_case(agent))
            .cloned()
            .unwrap_or_else(|| agent.to_string());
        self.groups.entry(key).or_default().merge(rules);
    }

    /// Adds a sitemap URI to the global set.
    pub fn add_sitemap(&mut self, uri: String) {
        insert_unique(&mut self.sitemaps, uri);
    }

    /// Returns `true` if the file declared no user-agent and no sitemap.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.sitemaps.is_empty()
    }

    /// Serializes the map to JSON.
    #[must_use]
    pub fn to_json(&self) -> String {
        facet_json::to_string(self)
    }
}
