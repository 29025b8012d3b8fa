use std::fmt;

/// A dependency name as written in `[dependencies]`, optionally pinned to a
/// provider with a `provider:name` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DependencyRef {
    pub provider: Option<String>,
    pub name: String,
}

impl DependencyRef {
    /// Parse `"name"` or `"provider:name"`.
    pub fn parse(s: &str) -> Self {
        match s.split_once(':') {
            Some((provider, name)) if !provider.is_empty() => Self {
                provider: Some(provider.to_string()),
                name: name.to_string(),
            },
            Some((_, name)) => Self {
                provider: None,
                name: name.to_string(),
            },
            None => Self {
                provider: None,
                name: s.to_string(),
            },
        }
    }
}

impl fmt::Display for DependencyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.provider {
            Some(p) => write!(f, "{p}:{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}
