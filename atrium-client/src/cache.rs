//! Local copy of the catalog plus the filter the user is looking through.

use atrium_model::EntryCreated;
use log::{debug, info, warn};

use crate::{
    error::ClientError,
    filter::{FilterState, derive_view},
    record::CatalogRecord,
    source::CatalogSource,
};

/// Snapshot of the catalog, the active filter and the view derived from
/// both.
///
/// A failed refresh keeps the previous snapshot and records the error;
/// the cache never clears data it already holds.
#[derive(Debug)]
pub struct CatalogCache<S> {
    source: S,
    snapshot: Vec<CatalogRecord>,
    filter: FilterState,
    derived: Vec<CatalogRecord>,
    error: Option<ClientError>,
}

impl<S: CatalogSource> CatalogCache<S> {
    /// Empty cache over `source`. Call [`refresh`](Self::refresh) to fill it.
    pub fn new(source: S) -> Self {
        Self {
            source,
            snapshot: Vec::new(),
            filter: FilterState::default(),
            derived: Vec::new(),
            error: None,
        }
    }

    /// Replace the snapshot with the server's catalog.
    ///
    /// Returns the number of entries fetched. On failure the snapshot is
    /// left untouched and the error is kept until the next successful
    /// refresh.
    pub async fn refresh(&mut self) -> Result<usize, ClientError> {
        match self.source.fetch_catalog().await {
            Ok(entries) => {
                self.snapshot =
                    entries.into_iter().map(CatalogRecord::from).collect();
                self.error = None;
                self.recompute();
                info!("catalog refreshed: {} entries", self.snapshot.len());
                Ok(self.snapshot.len())
            }
            Err(err) => {
                warn!(
                    "catalog refresh failed, keeping {} cached entries: {}",
                    self.snapshot.len(),
                    err
                );
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Replace both the query and the selected category.
    pub fn apply_filter(
        &mut self,
        query: impl Into<String>,
        category: Option<String>,
    ) {
        self.filter = FilterState::new(query, category);
        self.recompute();
    }

    /// Update the search text, keeping the selected category.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
        self.recompute();
    }

    /// Category selector tap: selects `category`, or clears it when it is
    /// already the selection.
    pub fn handle_category_press(&mut self, category: &str) {
        self.filter.toggle_category(category);
        self.recompute();
    }

    /// Append the entry announced by a push event.
    ///
    /// Events for an id already in the snapshot are ignored, which covers
    /// a refresh racing ahead of the event.
    pub fn on_entry_created(&mut self, event: EntryCreated) {
        if let Some(id) = event.id
            && self.snapshot.iter().any(|record| record.id == Some(id))
        {
            debug!("ignoring entry_created for cached entry {id}");
            return;
        }

        self.snapshot.push(CatalogRecord::from(event));
        self.recompute();
    }

    /// Every cached record in catalog order.
    pub fn snapshot(&self) -> &[CatalogRecord] {
        &self.snapshot
    }

    /// Records passing the current filter.
    pub fn derived_view(&self) -> &[CatalogRecord] {
        &self.derived
    }

    /// Active query and category.
    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    /// Error of the last refresh, cleared by the next successful one.
    pub fn error(&self) -> Option<&ClientError> {
        self.error.as_ref()
    }

    /// The snapshot is older than the server's catalog as far as we know.
    pub fn is_stale(&self) -> bool {
        self.error.is_some()
    }

    fn recompute(&mut self) {
        self.derived = derive_view(&self.snapshot, &self.filter);
    }
}
