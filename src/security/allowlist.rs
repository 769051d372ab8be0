use std::collections::HashSet;

/// Tool name that shell command patterns are written against
pub const SHELL_TOOL: &str = "Bash";

/// Marker that turns a shell pattern into a wildcard match
pub const WILDCARD_SUFFIX: &str = ":*";

/// Classification of a single allow-list entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern<'a> {
    /// `Bash(<prefix>)`
    Exact(&'a str),
    /// `Bash(<prefix>:*)`
    Wildcard(&'a str),
    /// Anything else, e.g. `Read(./src/**)` or `WebFetch`
    Other(&'a str),
}

impl<'a> Pattern<'a> {
    /// Classify a raw pattern string
    pub fn parse(raw: &'a str) -> Self {
        let inner = raw
            .strip_prefix(SHELL_TOOL)
            .and_then(|rest| rest.strip_prefix('('))
            .and_then(|rest| rest.strip_suffix(')'));

        match inner {
            Some(body) => match body.strip_suffix(WILDCARD_SUFFIX) {
                Some(prefix) if !prefix.is_empty() => Pattern::Wildcard(prefix),
                Some(_) => Pattern::Other(raw),
                None if !body.is_empty() => Pattern::Exact(body),
                None => Pattern::Other(raw),
            },
            None => Pattern::Other(raw),
        }
    }

    /// Whether this entry can ever admit a shell command
    pub fn is_shell(&self) -> bool {
        !matches!(self, Pattern::Other(_))
    }
}

/// Render the exact-match pattern for a command prefix
pub fn exact_pattern(prefix: &str) -> String {
    format!("{}({})", SHELL_TOOL, prefix)
}

/// Render the wildcard pattern for a command prefix
pub fn wildcard_pattern(prefix: &str) -> String {
    format!("{}({}{})", SHELL_TOOL, prefix, WILDCARD_SUFFIX)
}

/// Deduplicated, insertion-ordered set of allow patterns
///
/// Built once per invocation from every settings source and never mutated
/// afterwards. Entries are compared as literal strings.
#[derive(Debug, Clone, Default)]
pub struct AllowSet {
    patterns: Vec<String>,
    index: HashSet<String>,
}

impl AllowSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pattern, returning false if it was already present
    pub fn insert(&mut self, pattern: impl Into<String>) -> bool {
        let pattern = pattern.into();
        if self.index.contains(&pattern) {
            return false;
        }
        self.index.insert(pattern.clone());
        self.patterns.push(pattern);
        true
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.index.contains(pattern)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Patterns in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(String::as_str)
    }

    /// Patterns that can admit a shell command
    pub fn shell_patterns(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|p| Pattern::parse(p).is_shell())
    }
}

impl<S: Into<String>> FromIterator<S> for AllowSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = AllowSet::new();
        set.extend(iter);
        set
    }
}

impl<S: Into<String>> Extend<S> for AllowSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for pattern in iter {
            self.insert(pattern);
        }
    }
}
