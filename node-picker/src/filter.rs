use regex::{Regex, RegexBuilder};

use crate::node::Node;

#[derive(Clone, Debug, Default)]
enum Matcher {
    #[default]
    All,
    Substring(String),
    /// `None` when the pattern failed to compile; such a filter matches nothing.
    Regex(Option<Regex>),
}

/// Narrows the children listing by name.
///
/// Plain queries match a case-insensitive substring. A query wrapped in `((...))` is a
/// case-insensitive regular expression, e.g. `((^report_\d+\.pdf$))`.
#[derive(Clone, Debug, Default)]
pub struct SearchFilter {
    query: String,
    matcher: Matcher,
}

impl SearchFilter {
    /// Compile `query`. An empty (or whitespace) query matches everything.
    pub fn new(query: impl Into<String>) -> Self {
        let query = query.into();
        let matcher = compile(&query);
        Self { query, matcher }
    }

    /// Raw query as typed.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether the filter lets everything through.
    pub fn is_empty(&self) -> bool {
        matches!(self.matcher, Matcher::All)
    }

    /// Whether `node` passes the filter.
    pub fn matches(&self, node: &Node) -> bool {
        match &self.matcher {
            Matcher::All => true,
            Matcher::Substring(needle) => node.name.to_lowercase().contains(needle.as_str()),
            Matcher::Regex(Some(re)) => re.is_match(&node.name),
            Matcher::Regex(None) => false,
        }
    }

    /// Matching nodes, in their original order.
    pub fn apply<'a>(&self, nodes: &'a [Node]) -> Vec<&'a Node> {
        nodes.iter().filter(|n| self.matches(n)).collect()
    }
}

fn compile(query: &str) -> Matcher {
    let t = query.trim();
    if t.is_empty() {
        return Matcher::All;
    }
    if let Some(re) = parse_regex_token(t) {
        let built = RegexBuilder::new(re).case_insensitive(true).build().ok();
        return Matcher::Regex(built);
    }
    Matcher::Substring(t.to_lowercase())
}

fn parse_regex_token(token: &str) -> Option<&str> {
    if token.len() >= 4 && token.starts_with("((") && token.ends_with("))") {
        Some(&token[2..token.len() - 2])
    } else {
        None
    }
}
