//! Path patterns used to discover device roots.
//!
//! A pattern is an absolute path whose components may contain `*` (any run of
//! characters) and `?` (exactly one character). Wildcards never cross a `/`.

use crate::{Error, Result};
use std::path::{Component as PathComponent, Path};

/// One `/`-separated component of a [`Pattern`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    /// Matches exactly this name.
    Literal(String),
    /// Matches any name accepted by the wildcard expression.
    Wildcard(String),
}

impl Component {
    fn new(text: &str) -> Self {
        if text.contains(['*', '?']) {
            Component::Wildcard(text.to_string())
        } else {
            Component::Literal(text.to_string())
        }
    }

    /// Returns true if `name` matches this component.
    ///
    /// Wildcards do not match hidden names unless the component itself
    /// starts with a dot.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Component::Literal(literal) => literal == name,
            Component::Wildcard(expr) => {
                if name.starts_with('.') && !expr.starts_with('.') {
                    return false;
                }
                wildcard_match(expr, name)
            }
        }
    }
}

/// A parsed discovery pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    components: Vec<Component>,
}

impl Pattern {
    /// Parses a pattern, rejecting syntax the expander does not support.
    pub fn parse(pattern: &str) -> Result<Self> {
        if pattern.is_empty() {
            return Err(Error::pattern(pattern, "pattern is empty"));
        }
        let Some(rest) = pattern.strip_prefix('/') else {
            return Err(Error::pattern(pattern, "pattern must be an absolute path"));
        };
        if pattern.contains(['[', ']']) {
            return Err(Error::pattern(
                pattern,
                "character classes are not supported",
            ));
        }
        if rest.is_empty() {
            return Ok(Self {
                components: Vec::new(),
            });
        }

        let mut components = Vec::new();
        for text in rest.split('/') {
            if text.is_empty() {
                return Err(Error::pattern(pattern, "pattern has an empty component"));
            }
            if text.contains("**") {
                return Err(Error::pattern(
                    pattern,
                    "recursive wildcards are not supported",
                ));
            }
            components.push(Component::new(text));
        }

        Ok(Self { components })
    }

    /// Returns the pattern components below the filesystem root.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Returns true if an absolute `path` matches the whole pattern.
    pub fn matches(&self, path: &Path) -> bool {
        let mut parts = path.components();
        if parts.next() != Some(PathComponent::RootDir) {
            return false;
        }

        let names: Vec<&str> = match parts
            .map(|part| match part {
                PathComponent::Normal(name) => name.to_str(),
                PathComponent::CurDir => Some("."),
                PathComponent::ParentDir => Some(".."),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
        {
            Some(names) => names,
            None => return false,
        };

        names.len() == self.components.len()
            && self
                .components
                .iter()
                .zip(names)
                .all(|(component, name)| component.matches(name))
    }
}

/// Matches `name` against a `*`/`?` expression with single-star backtracking.
fn wildcard_match(expr: &str, name: &str) -> bool {
    let expr: Vec<char> = expr.chars().collect();
    let name: Vec<char> = name.chars().collect();

    let (mut ei, mut ni) = (0, 0);
    let mut star: Option<(usize, usize)> = None;

    while ni < name.len() {
        if ei < expr.len() && (expr[ei] == '?' || expr[ei] == name[ni]) {
            ei += 1;
            ni += 1;
        } else if ei < expr.len() && expr[ei] == '*' {
            star = Some((ei, ni));
            ei += 1;
        } else if let Some((star_ei, star_ni)) = star {
            // Let the last star swallow one more character and retry.
            ei = star_ei + 1;
            ni = star_ni + 1;
            star = Some((star_ei, star_ni + 1));
        } else {
            return false;
        }
    }

    expr[ei..].iter().all(|&c| c == '*')
}
