//! State selectors used to key transition callbacks.
//!
//! A selector is either a concrete state name or the wildcard. The wildcard
//! is its own variant, so a state literally named `"*"` is never mistaken
//! for "any state".

use serde::{Deserialize, Serialize};
use std::fmt;

/// Matches a single state by name, or any state.
///
/// # Example
///
/// ```rust
/// use switchyard::core::Selector;
///
/// let any = Selector::Any;
/// let two = Selector::from("two");
///
/// assert!(any.is_any());
/// assert_eq!(two, Selector::State("two".to_string()));
/// assert_ne!(Selector::from("*"), Selector::Any);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selector {
    /// Matches every state
    Any,
    /// Matches exactly one state
    State(String),
}

impl Selector {
    /// Selector for a single named state.
    pub fn state(name: impl Into<String>) -> Self {
        Self::State(name.into())
    }

    /// Check if this is the wildcard.
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("<any>"),
            Self::State(name) => f.write_str(name),
        }
    }
}

impl From<&str> for Selector {
    fn from(name: &str) -> Self {
        Self::State(name.to_string())
    }
}

impl From<String> for Selector {
    fn from(name: String) -> Self {
        Self::State(name)
    }
}

impl From<&String> for Selector {
    fn from(name: &String) -> Self {
        Self::State(name.clone())
    }
}

/// Normalized, ordered selectors for one side of a registration.
///
/// Registration APIs take `impl Into<Selectors>`, so callers may pass a
/// single state name, the wildcard, or a collection of names. A collection
/// fans out into one registration per element, repeats included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selectors(Vec<Selector>);

impl Selectors {
    /// The wildcard alone.
    pub fn any() -> Self {
        Self(vec![Selector::Any])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Selector> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for Selectors {
    type Item = Selector;
    type IntoIter = std::vec::IntoIter<Selector>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<T: Into<Selector>> FromIterator<T> for Selectors {
    fn from_iter<I: IntoIterator<Item = T>>(items: I) -> Self {
        Self(items.into_iter().map(Into::into).collect())
    }
}

impl From<Selector> for Selectors {
    fn from(selector: Selector) -> Self {
        Self(vec![selector])
    }
}

impl From<&str> for Selectors {
    fn from(name: &str) -> Self {
        Self(vec![Selector::from(name)])
    }
}

impl From<String> for Selectors {
    fn from(name: String) -> Self {
        Self(vec![Selector::from(name)])
    }
}

impl<T: Into<Selector>> From<Vec<T>> for Selectors {
    fn from(items: Vec<T>) -> Self {
        items.into_iter().collect()
    }
}

impl<T: Into<Selector>, const N: usize> From<[T; N]> for Selectors {
    fn from(items: [T; N]) -> Self {
        items.into_iter().collect()
    }
}

impl<T: Into<Selector> + Clone> From<&[T]> for Selectors {
    fn from(items: &[T]) -> Self {
        items.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_string_is_not_the_wildcard() {
        assert_eq!(Selector::from("*"), Selector::State("*".to_string()));
        assert!(!Selector::from("*").is_any());
        assert!(Selector::Any.is_any());
    }

    #[test]
    fn single_name_normalizes_to_one_selector() {
        let selectors = Selectors::from("one");
        assert_eq!(selectors.len(), 1);
        assert_eq!(selectors.iter().next(), Some(&Selector::state("one")));
    }

    #[test]
    fn collection_keeps_order() {
        let selectors = Selectors::from(vec!["three", "one", "two"]);
        let names: Vec<String> = selectors.iter().map(|s| s.to_string()).collect();
        assert_eq!(names, vec!["three", "one", "two"]);
    }

    #[test]
    fn repeated_names_are_kept() {
        let selectors = Selectors::from(["one", "two", "one"]);
        assert_eq!(selectors.len(), 3);
        let names: Vec<String> = selectors.iter().map(|s| s.to_string()).collect();
        assert_eq!(names, vec!["one", "two", "one"]);
    }

    #[test]
    fn collects_from_iterator() {
        let selectors: Selectors = ["one", "two"].into_iter().map(str::to_string).collect();
        assert_eq!(selectors.len(), 2);
    }

    #[test]
    fn wildcard_mixes_with_names() {
        let selectors = Selectors::from(vec![Selector::Any, Selector::state("two")]);
        assert_eq!(selectors.len(), 2);
        assert!(selectors.iter().next().is_some_and(Selector::is_any));
    }

    #[test]
    fn empty_collection_is_empty() {
        let selectors = Selectors::from(Vec::<&str>::new());
        assert!(selectors.is_empty());
    }
}
