use rustc_hash::FxHashMap;

/// The priority list entry matching every attribute not listed by name.
pub const WILDCARD: &str = "*";

/// Ordered attribute names defining the desired attribute order.
///
/// An attribute's weight is the index of its name in the list. Names that
/// appear more than once take the index of their first appearance. Unlisted
/// names take the index of the `*` wildcard when there is one, otherwise they
/// sort after every listed name with a weight equal to the list length.
#[derive(Debug, Clone, Default)]
pub struct PriorityList {
    names: Vec<Box<str>>,
    weights: FxHashMap<Box<str>, usize>,
    wildcard: Option<usize>,
}

impl PriorityList {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<Box<str>> = names.into_iter().map(|name| name.as_ref().into()).collect();

        let mut weights = FxHashMap::default();
        for (weight, name) in names.iter().enumerate() {
            weights.entry(name.clone()).or_insert(weight);
        }
        let wildcard = weights.get(WILDCARD).copied();

        Self {
            names,
            weights,
            wildcard,
        }
    }

    /// Sort weight for an attribute name; lower sorts first.
    pub fn weight(&self, name: &str) -> usize {
        self.weights
            .get(name)
            .copied()
            .or(self.wildcard)
            .unwrap_or(self.names.len())
    }

    /// Number of entries, duplicates included.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn has_wildcard(&self) -> bool {
        self.wildcard.is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|name| &**name)
    }
}

impl<S: AsRef<str>> FromIterator<S> for PriorityList {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_listed_names() {
        let priority = PriorityList::new(["id", "class", "href"]);
        assert_eq!(priority.weight("id"), 0);
        assert_eq!(priority.weight("class"), 1);
        assert_eq!(priority.weight("href"), 2);
    }

    #[test]
    fn test_unlisted_without_wildcard() {
        let priority = PriorityList::new(["id"]);
        assert_eq!(priority.weight("title"), 1);
        assert_eq!(priority.weight("alt"), 1);
        assert!(!priority.has_wildcard());
    }

    #[test]
    fn test_wildcard() {
        let priority = PriorityList::new(["id", "*", "onclick"]);
        assert_eq!(priority.weight("id"), 0);
        assert_eq!(priority.weight("class"), 1);
        assert_eq!(priority.weight("onclick"), 2);
        assert!(priority.has_wildcard());
    }

    #[test]
    fn test_duplicates_first_wins() {
        let priority = PriorityList::new(["class", "id", "class"]);
        assert_eq!(priority.weight("class"), 0);
        assert_eq!(priority.len(), 3);
        assert_eq!(priority.weight("title"), 3);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let priority = PriorityList::new(["id"]);
        assert_eq!(priority.weight("ID"), 1);
    }

    #[test]
    fn test_empty() {
        let priority = PriorityList::default();
        assert!(priority.is_empty());
        assert_eq!(priority.weight("anything"), 0);
    }
}
