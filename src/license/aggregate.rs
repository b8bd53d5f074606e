use std::collections::HashSet;

/// Delimiter used to join license and threat-group lists inside one CSV cell.
pub const LIST_DELIMITER: &str = ":";

/// Insertion-ordered set of strings.
///
/// Equality is exact: no case folding, no trimming.
#[derive(Debug, Default)]
pub struct UniqueList {
    seen: HashSet<String>,
    values: Vec<String>,
}

impl UniqueList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` unless an equal value was already added. Returns `true` if added.
    pub fn add_if_absent(&mut self, value: &str) -> bool {
        if self.seen.contains(value) {
            return false;
        }
        self.seen.insert(value.to_string());
        self.values.push(value.to_string());
        true
    }

    /// Consume the set, returning its values in lexicographic (byte) order.
    pub fn into_sorted_vec(self) -> Vec<String> {
        let mut values = self.values;
        values.sort();
        values
    }
}

impl<S: AsRef<str>> FromIterator<S> for UniqueList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = UniqueList::new();
        for value in iter {
            list.add_if_absent(value.as_ref());
        }
        list
    }
}

/// Deduplicate, sort and join `values` with `delimiter`.
///
/// An empty input yields an empty string.
pub fn aggregate<S: AsRef<str>>(values: &[S], delimiter: &str) -> String {
    values
        .iter()
        .collect::<UniqueList>()
        .into_sorted_vec()
        .join(delimiter)
}
