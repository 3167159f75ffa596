//! Point-in-time view handed to the presentation layer

use crate::state::FetchState;
use agency_query::{FilterCriteria, PageBounds};
use serde::Serialize;

/// Everything a screen needs to render a list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListSnapshot<T> {
    /// Fetch state at publication time
    pub state: FetchState,
    /// Items on the current page, in display order
    pub items: Vec<T>,
    /// Loaded items visible to the viewer
    pub total: usize,
    /// Items passing the current criteria
    pub filtered: usize,
    /// Current page and its slice of the filtered items
    pub page: PageBounds,
    /// The current fetch has outlasted the slow threshold
    pub slow_connection: bool,
    /// Automatic retries made by the current or last load
    pub retries: u32,
    /// Criteria the view was derived with
    pub criteria: FilterCriteria,
}

impl<T> ListSnapshot<T> {
    /// Loaded, but nothing matches the criteria
    #[must_use]
    pub fn is_filtered_empty(&self) -> bool {
        self.total > 0 && self.filtered == 0
    }

    /// Error state with data from an earlier load still on screen
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.state.is_error() && self.total > 0
    }
}
