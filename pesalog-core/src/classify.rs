//! Ordered keyword rules mapping transaction descriptions to categories.
//!
//! The ruleset is data, not control flow: deployments can swap the table
//! from config without touching the matcher.

use serde::{Deserialize, Serialize};

/// Category returned when no rule matches.
pub const FALLBACK_CATEGORY: &str = "Other";

/// One classification rule.
///
/// A rule matches when the lowercased description contains any of its
/// `keywords` (a rule with no keywords never matches). On a match, the
/// inner `refine` rules are tried in order first; if one of them matches,
/// its label wins. Otherwise `category` is returned when set, and when it
/// is `None` the matcher falls through to the next top-level rule. That
/// fallthrough is how a "paybill"-tagged description with no utility
/// sub-keyword ends up in a later bucket instead of a paybill one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub refine: Vec<Rule>,
}

impl Rule {
    /// Plain rule: keywords straight to a category label.
    pub fn label(category: &str, keywords: &[&str]) -> Self {
        Rule {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            category: Some(category.to_string()),
            refine: Vec::new(),
        }
    }

    /// Umbrella rule: keywords gate a nested rule list, no own label.
    pub fn umbrella(keywords: &[&str], refine: Vec<Rule>) -> Self {
        Rule {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            category: None,
            refine,
        }
    }

    fn matches(&self, desc: &str) -> bool {
        self.keywords.iter().any(|k| desc.contains(k.as_str()))
    }

    fn apply(&self, desc: &str) -> Option<&str> {
        if !self.matches(desc) {
            return None;
        }
        for sub in &self.refine {
            if let Some(category) = sub.apply(desc) {
                return Some(category);
            }
        }
        self.category.as_deref()
    }

    fn lowercase_keywords(&mut self) {
        for k in &mut self.keywords {
            *k = k.to_lowercase();
        }
        for sub in &mut self.refine {
            sub.lowercase_keywords();
        }
    }
}

/// First-match-wins evaluator over an ordered rule table.
///
/// Pure and stateless: safe to share across threads behind `&self`.
#[derive(Debug, Clone, PartialEq)]
pub struct Classifier {
    rules: Vec<Rule>,
}

impl Classifier {
    /// Keywords are lowercased once here so matching stays byte-wise.
    pub fn new(mut rules: Vec<Rule>) -> Self {
        for rule in &mut rules {
            rule.lowercase_keywords();
        }
        Classifier { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Map a description to its category, falling back to "Other".
    pub fn classify(&self, description: &str) -> String {
        let desc = description.to_lowercase();
        for rule in &self.rules {
            if let Some(category) = rule.apply(&desc) {
                return category.to_string();
            }
        }
        FALLBACK_CATEGORY.to_string()
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier::new(default_rules())
    }
}

/// The built-in M-Pesa ruleset, in priority order.
///
/// The paybill umbrella deliberately has no label of its own: a paybill
/// description matching none of the utility sub-rules falls through to
/// the later transfer/withdrawal/shopping rules.
pub fn default_rules() -> Vec<Rule> {
    vec![
        Rule::label("Airtime", &["airtime", "fuliza"]),
        Rule::umbrella(
            &["paybill", "pbl"],
            vec![
                Rule::label("Electricity", &["kplc", "power", "electricity"]),
                Rule::label("Water", &["water", "nwsc"]),
                Rule::label("TV Subscription", &["tv", "gotv", "startimes", "dstv"]),
                Rule::label("Internet", &["internet", "safaricom", "wifi"]),
            ],
        ),
        Rule::label("Money Transfer", &["send money", "sent to", "to"]),
        Rule::label("Cash Withdrawal", &["withdraw", "atm"]),
        Rule::label("Online Shopping", &["jumia", "amazon", "ebay", "alibaba"]),
        Rule::label(
            "Groceries",
            &["supermarket", "nakumatt", "tuskys", "naivas", "carrefour"],
        ),
        Rule::label("Dining", &["restaurant", "cafe", "food", "kfc", "java"]),
        Rule::label("Transport", &["uber", "taxi", "bolt", "matatu", "bus"]),
        Rule::label("Accommodation", &["hotel", "lodging", "accommodation"]),
        Rule::label("Healthcare", &["hospital", "clinic", "medical", "pharmacy"]),
        Rule::label("Education", &["school", "fee", "education", "university"]),
    ]
}
