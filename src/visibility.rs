use crate::schema::Category;
use log::debug;
use serde::{Deserialize, Serialize};

/// Expanded/collapsed flag per category section. Purely presentational:
/// collapsing a section hides its editable rows, never its totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionVisibility {
    expanded: [bool; 5],
}

impl Default for SectionVisibility {
    fn default() -> Self {
        Self {
            expanded: [true; 5],
        }
    }
}

impl SectionVisibility {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, category: Category) -> bool {
        self.expanded[category.index()]
    }

    /// Flips the section and returns its new state.
    pub fn toggle(&mut self, category: Category) -> bool {
        let flag = &mut self.expanded[category.index()];
        *flag = !*flag;
        debug!(
            "{} section {}",
            category,
            if *flag { "expanded" } else { "collapsed" }
        );
        *flag
    }

    pub fn set_expanded(&mut self, category: Category, expanded: bool) {
        self.expanded[category.index()] = expanded;
    }

    pub fn expand_all(&mut self) {
        self.expanded = [true; 5];
    }

    pub fn collapse_all(&mut self) {
        self.expanded = [false; 5];
    }

    /// The editable rows to draw for a section: all of them when expanded,
    /// none when collapsed.
    pub fn visible_rows<'a>(&self, category: Category, rows: &'a [String]) -> &'a [String] {
        if self.is_expanded(category) {
            rows
        } else {
            &[]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_expanded() {
        let visibility = SectionVisibility::new();
        for category in Category::ALL {
            assert!(visibility.is_expanded(category));
        }
    }

    #[test]
    fn test_toggle_is_independent() {
        let mut visibility = SectionVisibility::new();
        assert!(!visibility.toggle(Category::Income));
        assert!(!visibility.is_expanded(Category::Income));
        assert!(visibility.is_expanded(Category::Expense));

        assert!(visibility.toggle(Category::Income));
        assert!(visibility.is_expanded(Category::Income));
    }

    #[test]
    fn test_bulk_changes() {
        let mut visibility = SectionVisibility::new();
        visibility.collapse_all();
        assert!(Category::ALL.iter().all(|c| !visibility.is_expanded(*c)));

        visibility.set_expanded(Category::Equity, true);
        assert!(visibility.is_expanded(Category::Equity));

        visibility.expand_all();
        assert_eq!(visibility, SectionVisibility::default());
    }

    #[test]
    fn test_visible_rows() {
        let rows = vec!["Cash".to_string(), "Stock".to_string()];
        let mut visibility = SectionVisibility::new();
        assert_eq!(visibility.visible_rows(Category::Asset, &rows).len(), 2);

        visibility.toggle(Category::Asset);
        assert!(visibility.visible_rows(Category::Asset, &rows).is_empty());
        assert_eq!(rows.len(), 2);
    }
}
