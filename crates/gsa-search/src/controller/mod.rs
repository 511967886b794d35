//! The search session: one filter spec, one quick filter, one sort order and
//! the result list they produce.
//!
//! A session runs on a single-threaded runtime and is shared by reference, so
//! state lives behind `Cell`/`RefCell` rather than locks. `apply` suspends for
//! the configured latency before it evaluates; overlapping applies are not
//! cancelled, and whichever finishes last writes the result list.
//!
//! # Example
//!
//! ```
//! use gsa_model::Dataset;
//! use gsa_search::SearchSession;
//!
//! # tokio_test_block_on(async {
//! let dataset = Dataset::from_json("[]").unwrap();
//! let session = SearchSession::new(dataset);
//!
//! session.edit_filters(|f| f.toggle_agency("DHS"));
//! let matched = session.apply().await.unwrap();
//! assert_eq!(matched, 0);
//! assert_eq!(session.location(), "agencies=DHS");
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(f)
//! # }
//! ```

mod latency;

#[cfg(test)]
mod tests;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use gsa_model::{Dataset, Opportunity, Status};
use thiserror::Error;
use tracing::{debug, warn};

pub use latency::{FixedLatency, JitterLatency, Latency};

#[cfg(test)]
use latency::ScriptedLatency;

use crate::codec::{resolve_initial_filters, to_query_string, FilterSource};
use crate::filter::{
    apply_quick_filter, sort_opportunities, Clock, FilterContext, FilterError, FilterEvaluator,
    FilterSpec, QuickFilter, QuickFilterSelector, SortConfig, SortField, SystemClock,
};
use crate::store::StateStore;
use crate::summary::suggest_similar;

fn format_not_found(id: &str, suggestion: Option<&str>) -> String {
    let base = format!("opportunity '{id}' not found");
    match suggestion {
        Some(s) => format!("{base}. Did you mean '{s}'?"),
        None => base,
    }
}

fn not_found(id: &str, records: &[Opportunity]) -> SessionError {
    SessionError::NotFound {
        id: id.to_string(),
        suggestion: suggest_similar(id, records.iter().map(|o| o.id.as_str())).map(str::to_string),
    }
}

/// Errors raised by session actions.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The filter spec cannot be applied.
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// No opportunity has the given id.
    #[error("{}", format_not_found(id, suggestion.as_deref()))]
    NotFound {
        /// The id that was looked up.
        id: String,
        /// A similar existing id, if any.
        suggestion: Option<String>,
    },

    /// The status graph does not allow the requested change.
    #[error("cannot change '{id}' from {from} to {to}")]
    InvalidTransition {
        id: String,
        from: Status,
        to: Status,
    },
}

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Search state for one user.
pub struct SearchSession {
    records: RefCell<Vec<Opportunity>>,
    filters: RefCell<FilterSpec>,
    quick: Cell<QuickFilterSelector>,
    sort: Cell<SortConfig>,
    /// Positions in `records` of the last applied result, in dataset order.
    results: RefCell<Vec<usize>>,
    /// Position of each record by id. Records are never added or removed.
    positions: HashMap<String, usize>,
    location: RefCell<String>,
    in_flight: Cell<usize>,
    store: Option<StateStore>,
    latency: Box<dyn Latency>,
    clock: Box<dyn Clock>,
}

impl std::fmt::Debug for SearchSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchSession")
            .field("records", &self.records.borrow().len())
            .field("filters", &self.filters.borrow())
            .field("quick", &self.quick.get())
            .field("sort", &self.sort.get())
            .field("results", &self.results.borrow().len())
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl SearchSession {
    /// Creates a session over `dataset` with identity filters, no latency, no
    /// persistence and the system clock. Every record starts in the result list.
    pub fn new(dataset: Dataset) -> Self {
        let records = dataset.into_opportunities();
        let positions = records
            .iter()
            .enumerate()
            .map(|(index, o)| (o.id.clone(), index))
            .collect();
        let results = (0..records.len()).collect();
        Self {
            records: RefCell::new(records),
            filters: RefCell::new(FilterSpec::default()),
            quick: Cell::new(QuickFilterSelector::default()),
            sort: Cell::new(SortConfig::default()),
            results: RefCell::new(results),
            positions,
            location: RefCell::new(String::new()),
            in_flight: Cell::new(0),
            store: None,
            latency: Box::new(FixedLatency::NONE),
            clock: Box::new(SystemClock),
        }
    }

    /// Persists filters and status changes to `store`.
    pub fn with_store(mut self, store: StateStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Delays every apply by `latency`.
    pub fn with_latency(mut self, latency: impl Latency + 'static) -> Self {
        self.latency = Box::new(latency);
        self
    }

    /// Measures quick windows from `clock`.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Returns the store, if any.
    pub fn store(&self) -> Option<&StateStore> {
        self.store.as_ref()
    }

    // ==================== Startup ====================

    /// Restores persisted state without evaluating anything.
    ///
    /// Recorded status changes are laid over the dataset, then the initial
    /// filter spec is chosen from `url_query` and the stored spec. A restored
    /// spec whose ceiling bounds are inverted loses its ceiling.
    pub fn restore(&self, url_query: Option<&str>) -> FilterSource {
        if let Some(store) = &self.store {
            let overrides = store.load_status_overrides();
            let mut records = self.records.borrow_mut();
            for (id, status) in overrides {
                match self.position(&id).and_then(|index| records.get_mut(index)) {
                    Some(opp) => opp.status = status,
                    None => debug!(id = %id, "status override for unknown opportunity"),
                }
            }
        }

        let stored = self.store.as_ref().and_then(StateStore::load_filters);
        let mut resolved = resolve_initial_filters(url_query, stored);
        if let Err(e) = resolved.spec.validate() {
            warn!(error = %e, "dropping invalid ceiling from restored filters");
            resolved.spec.ceiling = None;
        }

        *self.location.borrow_mut() = to_query_string(&resolved.spec);
        *self.filters.borrow_mut() = resolved.spec;
        resolved.source
    }

    /// Restores persisted state and applies the resulting filters.
    pub async fn start(&self, url_query: Option<&str>) -> Result<FilterSource> {
        let source = self.restore(url_query);
        self.apply().await?;
        Ok(source)
    }

    // ==================== Filters ====================

    /// Returns a copy of the current filter spec.
    pub fn filters(&self) -> FilterSpec {
        self.filters.borrow().clone()
    }

    /// Edits the current filter spec in place. Nothing is applied.
    pub fn edit_filters<R>(&self, edit: impl FnOnce(&mut FilterSpec) -> R) -> R {
        edit(&mut self.filters.borrow_mut())
    }

    /// Applies the current filter spec.
    pub async fn apply(&self) -> Result<usize> {
        let spec = self.filters();
        self.apply_spec(spec).await
    }

    /// Makes `spec` current and applies it.
    ///
    /// Runs the filter engine then the active quick filter, and replaces the
    /// result list once the latency has elapsed. The spec and its query string
    /// are then persisted on a best-effort basis. Returns the number of
    /// results.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Filter` if the spec fails validation. The spec
    /// still becomes current, but the result list is left alone.
    pub async fn apply_spec(&self, spec: FilterSpec) -> Result<usize> {
        *self.filters.borrow_mut() = spec.clone();
        spec.validate()?;

        let quick = self.quick.get().active();
        let delay = self.latency.next_delay();

        self.in_flight.set(self.in_flight.get() + 1);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.set(self.in_flight.get().saturating_sub(1));

        let context = FilterContext::from_clock(self.clock.as_ref());
        let indices: Vec<usize> = {
            let records = self.records.borrow();
            let matched = FilterEvaluator::new(&spec, &context).filter_items(&records);
            apply_quick_filter(matched, quick, &context)
                .into_iter()
                .filter_map(|o| self.position(&o.id))
                .collect()
        };
        let count = indices.len();
        debug!(
            constraints = spec.active_constraints(),
            quick = ?quick,
            results = count,
            "applied filters"
        );
        *self.results.borrow_mut() = indices;

        if let Some(store) = &self.store {
            store.save_filters(&spec);
        }
        *self.location.borrow_mut() = to_query_string(&spec);

        Ok(count)
    }

    /// True while at least one apply is waiting out its latency.
    pub fn is_applying(&self) -> bool {
        self.in_flight.get() > 0
    }

    /// Query string of the last applied (or restored) spec.
    pub fn location(&self) -> String {
        self.location.borrow().clone()
    }

    // ==================== Quick filter ====================

    /// The active quick filter.
    pub fn quick_filter(&self) -> Option<QuickFilter> {
        self.quick.get().active()
    }

    /// Selects a quick filter without re-applying.
    pub fn set_quick_filter(&self, filter: Option<QuickFilter>) {
        self.quick.set(QuickFilterSelector::new(filter));
    }

    /// Toggles a quick filter and re-applies the current spec.
    ///
    /// Returns the quick filter now active.
    pub async fn toggle_quick_filter(&self, filter: QuickFilter) -> Result<Option<QuickFilter>> {
        let mut selector = self.quick.get();
        selector.toggle(filter);
        self.quick.set(selector);
        self.apply().await?;
        Ok(selector.active())
    }

    // ==================== Sorting ====================

    /// The current sort order.
    pub fn sort(&self) -> SortConfig {
        self.sort.get()
    }

    /// Replaces the sort order. The result list itself is not touched.
    pub fn set_sort(&self, config: SortConfig) {
        self.sort.set(config);
    }

    /// Column-header sort toggle. See [`SortConfig::toggle`].
    pub fn toggle_sort(&self, field: SortField) -> SortConfig {
        let mut config = self.sort.get();
        config.toggle(field);
        self.sort.set(config);
        config
    }

    // ==================== Results ====================

    /// The last applied result list, in dataset order.
    pub fn results(&self) -> Vec<Opportunity> {
        let records = self.records.borrow();
        self.results
            .borrow()
            .iter()
            .filter_map(|&index| records.get(index))
            .cloned()
            .collect()
    }

    /// The last applied result list in the current sort order.
    pub fn sorted_results(&self) -> Vec<Opportunity> {
        let results = self.results();
        let mut refs: Vec<&Opportunity> = results.iter().collect();
        sort_opportunities(&mut refs, self.sort.get());
        refs.into_iter().cloned().collect()
    }

    /// All records, including status changes made in this session.
    pub fn records(&self) -> Vec<Opportunity> {
        self.records.borrow().clone()
    }

    /// Looks up a record by id.
    pub fn find(&self, id: &str) -> Result<Opportunity> {
        let records = self.records.borrow();
        self.position(id)
            .and_then(|index| records.get(index))
            .cloned()
            .ok_or_else(|| not_found(id, &records))
    }

    // ==================== Status ====================

    /// Moves a record to `to` if the status graph allows it, and records the
    /// change in the store.
    pub fn transition(&self, id: &str, to: Status) -> Result<Opportunity> {
        let updated = {
            let mut records = self.records.borrow_mut();
            let Some(index) = self.position(id) else {
                return Err(not_found(id, &records));
            };
            let opp = &mut records[index];
            if !opp.status.can_transition_to(to) {
                return Err(SessionError::InvalidTransition {
                    id: id.to_string(),
                    from: opp.status,
                    to,
                });
            }
            opp.status = to;
            opp.clone()
        };

        debug!(id = %id, status = %to, "status changed");
        if let Some(store) = &self.store {
            store.save_status_override(id, to);
        }
        Ok(updated)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Marks a `Ready` record as `Submitted`.
    pub fn mark_submitted(&self, id: &str) -> Result<Opportunity> {
        self.transition(id, Status::Submitted)
    }
}
