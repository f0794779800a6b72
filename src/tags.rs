//! Selection of registrations by tag.

use regex::Regex;
use tracing::debug;

/// Decides whether a registration's tags select it for evaluation.
///
/// The monitor tag is treated as a regular expression and matches a tag if
/// it is found anywhere in it. A pattern that does not compile degrades to
/// exact string comparison; that is not an error.
#[derive(Debug, Clone)]
pub enum TagMatcher {
    Pattern(Regex),
    Exact(String),
}

impl TagMatcher {
    pub fn new(pattern: &str) -> Self {
        match Regex::new(pattern) {
            Ok(regex) => TagMatcher::Pattern(regex),
            Err(e) => {
                debug!(pattern, error = %e, "monitor tag is not a valid regex; using exact match");
                TagMatcher::Exact(pattern.to_string())
            }
        }
    }

    /// True if any tag matches. An empty tag set never matches.
    pub fn matches<S: AsRef<str>>(&self, tags: &[S]) -> bool {
        match self {
            TagMatcher::Pattern(regex) => tags.iter().any(|tag| regex.is_match(tag.as_ref())),
            TagMatcher::Exact(pattern) => tags.iter().any(|tag| tag.as_ref() == pattern),
        }
    }
}
