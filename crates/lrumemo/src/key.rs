//! Cache keys built from call arguments

use std::collections::BTreeMap;

/// Identity of one call: positional values plus named values.
///
/// Named values are kept sorted by name, so the order in which they are
/// supplied does not affect equality or hashing. Positional order does.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallKey<P, N = P> {
    positional: Vec<P>,
    named: BTreeMap<String, N>,
}

impl<P, N> CallKey<P, N> {
    /// Key for a call with only positional arguments
    pub fn new<I>(positional: I) -> Self
    where
        I: IntoIterator<Item = P>,
    {
        Self {
            positional: positional.into_iter().collect(),
            named: BTreeMap::new(),
        }
    }

    /// Key for a call with positional and named arguments.
    ///
    /// If a name appears more than once the last value wins.
    pub fn from_parts<I, J, S>(positional: I, named: J) -> Self
    where
        I: IntoIterator<Item = P>,
        J: IntoIterator<Item = (S, N)>,
        S: Into<String>,
    {
        Self {
            positional: positional.into_iter().collect(),
            named: named
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }

    /// Add (or replace) a named argument
    pub fn with_named(mut self, name: impl Into<String>, value: N) -> Self {
        self.named.insert(name.into(), value);
        self
    }

    /// Positional arguments in call order
    pub fn positional(&self) -> &[P] {
        &self.positional
    }

    /// Named arguments sorted by name
    pub fn named(&self) -> impl Iterator<Item = (&str, &N)> {
        self.named.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Look up a single named argument
    pub fn named_value(&self, name: &str) -> Option<&N> {
        self.named.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::RandomState;
    use std::hash::BuildHasher;

    #[test]
    fn test_named_order_independent() {
        let a: CallKey<&str, i32> = CallKey::new(["x"]).with_named("a", 1).with_named("b", 2);
        let b: CallKey<&str, i32> = CallKey::new(["x"]).with_named("b", 2).with_named("a", 1);

        assert_eq!(a, b);

        let state = RandomState::new();
        assert_eq!(state.hash_one(&a), state.hash_one(&b));
    }

    #[test]
    fn test_from_parts_order_independent() {
        let a: CallKey<i32> = CallKey::from_parts([7], [("a", 1), ("b", 2)]);
        let b: CallKey<i32> = CallKey::from_parts([7], [("b", 2), ("a", 1)]);

        assert_eq!(a, b);
    }

    #[test]
    fn test_positional_order_matters() {
        let a: CallKey<i32> = CallKey::new([1, 2]);
        let b: CallKey<i32> = CallKey::new([2, 1]);

        assert_ne!(a, b);
    }

    #[test]
    fn test_named_values_distinguish_keys() {
        let a: CallKey<i32> = CallKey::new([1]).with_named("scale", 2);
        let b: CallKey<i32> = CallKey::new([1]).with_named("scale", 3);
        let c: CallKey<i32> = CallKey::new([1]);

        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_duplicate_name_last_wins() {
        let key: CallKey<i32> = CallKey::from_parts([], [("n", 1), ("n", 5)]);

        assert_eq!(key.named_value("n"), Some(&5));
        assert_eq!(key.named().count(), 1);
    }

    #[test]
    fn test_accessors() {
        let key: CallKey<i32, &str> = CallKey::new([3, 4])
            .with_named("mode", "fast")
            .with_named("label", "x");

        assert_eq!(key.positional(), &[3, 4]);
        let named: Vec<_> = key.named().collect();
        assert_eq!(named, vec![("label", &"x"), ("mode", &"fast")]);
        assert_eq!(key.named_value("missing"), None);
    }
}
