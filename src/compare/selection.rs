use std::fmt;

/// Why a coin could not be added to the comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    Full { max: usize },
    Duplicate(String),
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::Full { max } => write!(f, "Select up to {} cryptocurrencies to compare", max),
            SelectionError::Duplicate(id) => write!(f, "{} is already selected", id),
        }
    }
}

impl std::error::Error for SelectionError {}

/// Ordered set of coin ids chosen for comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonSelection {
    ids: Vec<String>,
    max: usize,
}

impl ComparisonSelection {
    pub fn new(max: usize) -> Self {
        Self {
            ids: Vec::new(),
            max,
        }
    }

    /// Build from a list, dropping duplicates and anything past `max`
    pub fn from_ids<I, S>(ids: I, max: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selection = Self::new(max);
        for id in ids {
            if selection.add(id).is_err() && selection.is_full() {
                break;
            }
        }
        selection
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= self.max
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    pub fn add(&mut self, id: impl Into<String>) -> Result<(), SelectionError> {
        let id = id.into();
        if self.contains(&id) {
            return Err(SelectionError::Duplicate(id));
        }
        if self.is_full() {
            return Err(SelectionError::Full { max: self.max });
        }
        self.ids.push(id);
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|s| s != id);
        self.ids.len() != before
    }

    /// Add if absent, remove if present. Returns whether `id` ends up selected.
    pub fn toggle(&mut self, id: &str) -> Result<bool, SelectionError> {
        if self.remove(id) {
            Ok(false)
        } else {
            self.add(id).map(|_| true)
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sixth_coin_rejected() {
        let mut sel = ComparisonSelection::from_ids(["a", "b", "c", "d", "e"], 5);
        assert_eq!(sel.len(), 5);
        assert_eq!(sel.add("f"), Err(SelectionError::Full { max: 5 }));
        assert_eq!(sel.len(), 5);
        assert!(!sel.contains("f"));
    }

    #[test]
    fn test_duplicates_rejected() {
        let mut sel = ComparisonSelection::new(5);
        sel.add("bitcoin").unwrap();
        assert_eq!(sel.add("bitcoin"), Err(SelectionError::Duplicate("bitcoin".into())));
        assert_eq!(sel.ids(), &["bitcoin".to_string()]);
    }

    #[test]
    fn test_from_ids_truncates_and_dedups() {
        let sel = ComparisonSelection::from_ids(["a", "a", "b", "c", "d", "e", "f", "g"], 5);
        assert_eq!(sel.ids(), &["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_toggle_preserves_order() {
        let mut sel = ComparisonSelection::from_ids(["bitcoin", "ethereum", "solana"], 5);
        assert_eq!(sel.toggle("ethereum"), Ok(false));
        assert_eq!(sel.toggle("cardano"), Ok(true));
        assert_eq!(sel.ids(), &["bitcoin", "solana", "cardano"]);
    }

    #[test]
    fn test_toggle_when_full() {
        let mut sel = ComparisonSelection::from_ids(["a", "b"], 2);
        assert!(sel.toggle("c").is_err());
        assert_eq!(sel.toggle("a"), Ok(false));
        assert_eq!(sel.toggle("c"), Ok(true));
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            SelectionError::Full { max: 5 }.to_string(),
            "Select up to 5 cryptocurrencies to compare"
        );
    }
}
