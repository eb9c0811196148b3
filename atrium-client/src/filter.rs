//! Client-side filtering of the catalog snapshot.

use crate::record::CatalogRecord;

/// Current search text and selected category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Search text. Empty means no text condition.
    pub query: String,
    /// Selected category. `None` shows every category.
    pub category: Option<String>,
}

impl FilterState {
    /// Filter with the given query and selection.
    pub fn new(query: impl Into<String>, category: Option<String>) -> Self {
        Self {
            query: query.into(),
            category,
        }
    }

    /// Both conditions must hold: the description contains the query
    /// (ignoring case) and the category matches when one is selected.
    /// The query is matched as typed, whitespace included.
    pub fn matches(&self, record: &CatalogRecord) -> bool {
        let text_matches = self.query.is_empty()
            || record
                .description
                .to_lowercase()
                .contains(&self.query.to_lowercase());

        let category_matches = match &self.category {
            None => true,
            Some(selected) => record.category.as_deref() == Some(selected.as_str()),
        };

        text_matches && category_matches
    }

    /// Select `category`, or clear the selection if it is already selected.
    pub fn toggle_category(&mut self, category: &str) {
        if self.category.as_deref() == Some(category) {
            self.category = None;
        } else {
            self.category = Some(category.to_string());
        }
    }

    /// True when the filter lets every record through.
    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && self.category.is_none()
    }
}

/// Records of `snapshot` that pass `filter`, in snapshot order.
pub fn derive_view(
    snapshot: &[CatalogRecord],
    filter: &FilterState,
) -> Vec<CatalogRecord> {
    snapshot
        .iter()
        .filter(|record| filter.matches(record))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_model::MediaRef;

    fn record(description: &str, category: Option<&str>) -> CatalogRecord {
        CatalogRecord {
            id: None,
            media_ref: MediaRef::new("uploads/x.jpg").unwrap(),
            description: description.to_string(),
            category: category.map(str::to_string),
            created_at: None,
        }
    }

    fn listing() -> Vec<CatalogRecord> {
        vec![
            record("Modern loft", Some("Apartments")),
            record("Beach villa", Some("Villas")),
        ]
    }

    #[test]
    fn empty_filter_yields_full_snapshot() {
        let snapshot = listing();
        assert_eq!(derive_view(&snapshot, &FilterState::default()), snapshot);
    }

    #[test]
    fn query_and_category_are_conjunctive() {
        let snapshot = listing();

        let by_query = FilterState::new("loft", None);
        assert_eq!(derive_view(&snapshot, &by_query), vec![snapshot[0].clone()]);

        let by_category = FilterState::new("", Some("Villas".into()));
        assert_eq!(
            derive_view(&snapshot, &by_category),
            vec![snapshot[1].clone()]
        );

        let both = FilterState::new("loft", Some("Villas".into()));
        assert!(derive_view(&snapshot, &both).is_empty());
    }

    #[test]
    fn query_ignores_case() {
        let snapshot = listing();
        let filter = FilterState::new("BEACH", None);
        assert_eq!(derive_view(&snapshot, &filter), vec![snapshot[1].clone()]);
    }

    #[test]
    fn whitespace_query_is_matched_literally() {
        let snapshot = vec![record("Loft", None), record("Modern loft", None)];

        let blank = FilterState::new(" ", None);
        assert!(!blank.is_empty());
        assert!(derive_view(&snapshot, &blank).is_empty());

        let padded = FilterState::new("loft ", None);
        assert!(derive_view(&snapshot, &padded).is_empty());

        let inner = FilterState::new("n l", None);
        assert_eq!(derive_view(&snapshot, &inner), vec![snapshot[1].clone()]);
    }

    #[test]
    fn uncategorized_records_only_match_without_selection() {
        let snapshot = vec![record("Studio", None)];
        assert_eq!(derive_view(&snapshot, &FilterState::default()).len(), 1);

        let filter = FilterState::new("", Some("Apartments".into()));
        assert!(derive_view(&snapshot, &filter).is_empty());
    }

    #[test]
    fn deriving_twice_is_stable() {
        let snapshot = listing();
        let filter = FilterState::new("a", Some("Apartments".into()));
        assert_eq!(
            derive_view(&snapshot, &filter),
            derive_view(&snapshot, &filter)
        );
    }

    #[test]
    fn toggling_the_same_category_twice_clears_it() {
        let mut filter = FilterState::default();
        filter.toggle_category("Villas");
        assert_eq!(filter.category.as_deref(), Some("Villas"));

        filter.toggle_category("Apartments");
        assert_eq!(filter.category.as_deref(), Some("Apartments"));

        filter.toggle_category("Apartments");
        assert_eq!(filter.category, None);
    }
}
