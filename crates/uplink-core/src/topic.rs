//! Topic routing.
//!
//! An ordered list of `(pattern, category)` rules is evaluated against the
//! topic a message arrived on. The first rule whose pattern matches and yields
//! a non-empty first capture group wins; its capture is the device serial.
//!
//! ```text
//! data/ABC123/environment ──▶ data/(.+)/environment ──▶ (ABC123, Environment)
//! status/XYZ/lock         ──▶ status/(.+)/lock      ──▶ (XYZ, LockStatus)
//! foo/bar                 ──▶ (no rule)             ──▶ None
//! ```
//!
//! Patterns are searched, not anchored, so a rule may match anywhere inside
//! the topic. A rule whose pattern fails to compile is kept in place but never
//! matches.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::config::topics;

/// Topic category, one per translator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Environmental sensor readings
    Environment,
    /// Door lock states
    LockStatus,
    /// Power consumption totals
    PowerUsage,
    /// Power supply alarm
    PowerAlarm,
    /// Display screen alarm
    ScreenAlarm,
}

impl Category {
    /// All categories in default evaluation order.
    pub const ALL: [Category; 5] = [
        Category::Environment,
        Category::LockStatus,
        Category::PowerUsage,
        Category::PowerAlarm,
        Category::ScreenAlarm,
    ];

    /// Topic pattern used for this category by the default router.
    pub fn default_pattern(&self) -> &'static str {
        match self {
            Category::Environment => topics::ENVIRONMENT,
            Category::LockStatus => topics::LOCK_STATUS,
            Category::PowerUsage => topics::POWER_USAGE,
            Category::PowerAlarm => topics::POWER_ALARM,
            Category::ScreenAlarm => topics::SCREEN_ALARM,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Environment => write!(f, "environment"),
            Self::LockStatus => write!(f, "lock"),
            Self::PowerUsage => write!(f, "power"),
            Self::PowerAlarm => write!(f, "power alarm"),
            Self::ScreenAlarm => write!(f, "screen alarm"),
        }
    }
}

/// A single routing rule.
#[derive(Debug, Clone)]
pub struct TopicRule {
    pattern: String,
    category: Category,
    regex: Option<Regex>,
}

impl TopicRule {
    /// Create a rule. A pattern that does not compile produces a rule that
    /// never matches.
    pub fn new(pattern: impl Into<String>, category: Category) -> Self {
        let pattern = pattern.into();
        let regex = match Regex::new(&pattern) {
            Ok(re) => Some(re),
            Err(e) => {
                warn!(
                    "Topic pattern '{}' for {} does not compile, rule disabled: {}",
                    pattern, category, e
                );
                None
            }
        };
        Self {
            pattern,
            category,
            regex,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Whether the pattern compiled.
    pub fn is_active(&self) -> bool {
        self.regex.is_some()
    }

    /// Serial captured from `topic`, if this rule matches it.
    ///
    /// A match without a first capture group, or with an empty one, counts as
    /// no match.
    pub fn capture(&self, topic: &str) -> Option<String> {
        let caps = self.regex.as_ref()?.captures(topic)?;
        caps.get(1)
            .map(|m| m.as_str())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

/// Outcome of a successful route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicMatch {
    /// Device serial number captured from the topic
    pub serial: String,
    /// Category of the winning rule
    pub category: Category,
}

/// Ordered rule list, first match wins.
#[derive(Debug, Clone)]
pub struct TopicRouter {
    rules: Vec<TopicRule>,
}

/// Router with the gateway's built-in rules.
pub static DEFAULT_ROUTER: Lazy<TopicRouter> = Lazy::new(TopicRouter::gateway_default);

impl TopicRouter {
    pub fn new(rules: Vec<TopicRule>) -> Self {
        Self { rules }
    }

    /// Built-in rules, one per category, in [`Category::ALL`] order.
    pub fn gateway_default() -> Self {
        Self::new(
            Category::ALL
                .iter()
                .map(|c| TopicRule::new(c.default_pattern(), *c))
                .collect(),
        )
    }

    pub fn rules(&self) -> &[TopicRule] {
        &self.rules
    }

    /// Find the first rule matching `topic`.
    pub fn route(&self, topic: &str) -> Option<TopicMatch> {
        for (index, rule) in self.rules.iter().enumerate() {
            if let Some(serial) = rule.capture(topic) {
                debug!(
                    "Topic '{}' matched rule #{} '{}' ({}), serial '{}'",
                    topic, index, rule.pattern, rule.category, serial
                );
                return Some(TopicMatch {
                    serial,
                    category: rule.category,
                });
            }
            trace!("Topic '{}' skipped rule #{} '{}'", topic, index, rule.pattern);
        }
        debug!("Topic '{}' matched no rule", topic);
        None
    }
}

impl Default for TopicRouter {
    fn default() -> Self {
        Self::gateway_default()
    }
}
