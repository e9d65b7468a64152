//! The most recently loaded sales for one visit to the sales screen.

use std::sync::Arc;

use time::{Date, UtcOffset};

use crate::Error;

use super::{
    core::Sale,
    filter::{FilterKey, FilterSelection, apply_filter},
    statistics::{SaleStatistics, compute_statistics},
};

/// An immutable list of sales as fetched from the store by one load.
pub type Snapshot = Arc<[Sale]>;

/// Identifies one load started with [SalesSession::begin_load].
///
/// Later loads get larger generation numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

impl LoadTicket {
    /// The generation number of the load.
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Where the session is in loading its sales.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    /// No load has been started.
    #[default]
    Idle,
    /// A load has been started and has not finished.
    Loading,
    /// The latest load finished and its sales are in the snapshot.
    Loaded,
    /// The latest load failed with the given message.
    Failed(String),
}

/// Holds the latest snapshot of sales and the brand filter chosen for it.
///
/// Each load replaces the snapshot and resets the filter to every sale.
/// Loads are tracked with [LoadTicket]s so that a load which finishes after
/// a newer one was started is rejected instead of overwriting newer data.
#[derive(Debug, Clone)]
pub struct SalesSession {
    latest: LoadTicket,
    state: LoadState,
    snapshot: Snapshot,
    selection: FilterSelection,
}

impl Default for SalesSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SalesSession {
    /// Create a session with no sales.
    pub fn new() -> Self {
        Self {
            latest: LoadTicket(0),
            state: LoadState::Idle,
            snapshot: Arc::from(Vec::new()),
            selection: FilterSelection::default(),
        }
    }

    /// Start a new load and get the ticket to finish it with.
    ///
    /// Any load started before this one becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest = LoadTicket(self.latest.0 + 1);
        self.state = LoadState::Loading;
        tracing::debug!("Started loading sales, load {}", self.latest.0);

        self.latest
    }

    /// Install the sales fetched by the load `ticket`.
    ///
    /// `sales` should be in the store's query order, newest first. The
    /// filter is reset to every sale.
    ///
    /// # Errors
    /// Returns [Error::StaleLoad] if a newer load has been started since
    /// `ticket` was issued. The session is left unchanged.
    pub fn finish_load(&mut self, ticket: LoadTicket, sales: Vec<Sale>) -> Result<Snapshot, Error> {
        self.check_latest(ticket)?;

        self.selection = FilterSelection::new(&sales);
        self.snapshot = Arc::from(sales);
        self.state = LoadState::Loaded;
        tracing::info!(
            "Loaded {} sales across {} brands",
            self.snapshot.len(),
            self.selection.brands().len()
        );

        Ok(self.snapshot.clone())
    }

    /// Record that the load `ticket` failed with `message`.
    ///
    /// The snapshot is emptied so that the screen shows its empty state.
    ///
    /// # Errors
    /// Returns [Error::StaleLoad] if a newer load has been started since
    /// `ticket` was issued. The session is left unchanged.
    pub fn fail_load(&mut self, ticket: LoadTicket, message: &str) -> Result<(), Error> {
        self.check_latest(ticket)?;

        tracing::warn!("Could not load sales: {message}");
        self.selection = FilterSelection::default();
        self.snapshot = Arc::from(Vec::new());
        self.state = LoadState::Failed(message.to_owned());

        Ok(())
    }

    fn check_latest(&self, ticket: LoadTicket) -> Result<(), Error> {
        if ticket == self.latest {
            Ok(())
        } else {
            tracing::warn!(
                "Discarding load {} because load {} has started",
                ticket.0,
                self.latest.0
            );
            Err(Error::StaleLoad {
                ticket: ticket.0,
                latest: self.latest.0,
            })
        }
    }

    /// Where the session is in loading its sales.
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// A shared handle to the current snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.clone()
    }

    /// All sales in the current snapshot.
    pub fn sales(&self) -> &[Sale] {
        &self.snapshot
    }

    /// The brands of the current snapshot, sorted ascending.
    pub fn brands(&self) -> &[String] {
        self.selection.brands()
    }

    /// The selected filter.
    pub fn filter_key(&self) -> &FilterKey {
        self.selection.key()
    }

    /// Show every sale.
    pub fn select_all(&mut self) {
        self.selection.select_all();
    }

    /// Show only the sales of `brand`.
    ///
    /// # Errors
    /// Returns [Error::UnknownBrand] if no sale in the snapshot has `brand`.
    pub fn select_brand(&mut self, brand: &str) -> Result<(), Error> {
        self.selection.select_brand(brand)
    }

    /// The sales that match the selected filter, in snapshot order.
    pub fn filtered(&self) -> Vec<&Sale> {
        apply_filter(&self.snapshot, self.selection.key())
    }

    /// The statistics of every sale in the snapshot, ignoring the filter.
    pub fn statistics(&self, today: Date, local_offset: UtcOffset) -> SaleStatistics {
        compute_statistics(&self.snapshot, today, local_offset)
    }
}
