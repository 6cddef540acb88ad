//! Users collection state machine.
//!
//! [`ListState`] is the single source of truth for the table screen:
//! query (page, sort, search, filters), the last good page of rows, and
//! the fetch phase. It is deliberately pure. Every query-changing
//! operation hands back a [`StampedQuery`]; the screen runs the fetch
//! and feeds the outcome to [`ListState::apply`] with that stamp. Only
//! the latest stamp is accepted, so a slow response for an old query can
//! never clobber newer state, regardless of arrival order.

use std::collections::BTreeMap;

use starboard_shared::{SortDirection, User, UserPage};

use crate::error::ApiError;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_SORT_FIELD: &str = "name";

// =========================================================
// Query
// =========================================================

/// Everything the list endpoint needs to produce one page.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub page: u32,
    pub page_size: u32,
    pub sort_by: String,
    pub sort_order: SortDirection,
    pub search: String,
    /// Active column filters keyed by parameter name (`active`, `roles`).
    /// A `BTreeMap` keeps the emitted parameter order deterministic.
    pub filters: BTreeMap<String, String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            sort_by: DEFAULT_SORT_FIELD.to_string(),
            sort_order: SortDirection::Asc,
            search: String::new(),
            filters: BTreeMap::new(),
        }
    }
}

impl ListQuery {
    /// Wire parameters in their canonical order. `search` is omitted when
    /// empty; filters follow in key order.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page.to_string()),
            ("pageSize".to_string(), self.page_size.to_string()),
            ("sortBy".to_string(), self.sort_by.clone()),
            ("sortOrder".to_string(), self.sort_order.as_str().to_string()),
        ];
        if !self.search.is_empty() {
            params.push(("search".to_string(), self.search.clone()));
        }
        for (key, value) in &self.filters {
            params.push((key.clone(), value.clone()));
        }
        params
    }
}

// =========================================================
// State machine
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPhase {
    Loading,
    Ready,
    Error,
}

/// A query snapshot tagged with its sequence number. The stamp travels
/// with the fetch and comes back through [`ListState::apply`].
#[derive(Debug, Clone, PartialEq)]
pub struct StampedQuery {
    pub seq: u64,
    pub query: ListQuery,
}

#[derive(Debug, Default)]
pub struct ListState {
    query: ListQuery,
    phase: ListPhase,
    /// Last good result; kept through errors so the table never blanks.
    result: Option<UserPage>,
    error: Option<String>,
    /// Latest stamp handed out; the only one `apply` will accept.
    issued: u64,
}

impl Default for ListPhase {
    fn default() -> Self {
        ListPhase::Loading
    }
}

impl ListState {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Accessors ---

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn phase(&self) -> ListPhase {
        self.phase
    }

    pub fn result(&self) -> Option<&UserPage> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn rows(&self) -> &[User] {
        self.result.as_ref().map(|p| p.users.as_slice()).unwrap_or(&[])
    }

    pub fn total_pages(&self) -> u32 {
        self.result.as_ref().map(|p| p.total_pages).unwrap_or(0)
    }

    pub fn total_users(&self) -> u64 {
        self.result.as_ref().map(|p| p.total_users).unwrap_or(0)
    }

    // --- Query operations ---

    /// Unconditional refetch of the current query: initial load, retry,
    /// refresh after an out-of-band mutation.
    pub fn begin(&mut self) -> StampedQuery {
        self.stamp()
    }

    /// Explicit page change. Out-of-range targets (and the current page)
    /// are a no-op; this is the one operation that does not reset `page`.
    pub fn set_page(&mut self, page: u32) -> Option<StampedQuery> {
        if page < 1 || page > self.total_pages() || page == self.query.page {
            return None;
        }
        self.query.page = page;
        Some(self.stamp())
    }

    /// Sorting by the current field flips the direction; a new field
    /// starts ascending. Resets to page 1 either way.
    pub fn set_sort(&mut self, field: &str) -> StampedQuery {
        if self.query.sort_by == field {
            self.query.sort_order = self.query.sort_order.toggled();
        } else {
            self.query.sort_by = field.to_string();
            self.query.sort_order = SortDirection::Asc;
        }
        self.query.page = 1;
        self.stamp()
    }

    pub fn set_search(&mut self, text: &str) -> StampedQuery {
        self.query.search = text.to_string();
        self.query.page = 1;
        self.stamp()
    }

    /// Replaces one filter. An empty value clears the key (the "All"
    /// option of a filter select). Resets to page 1.
    pub fn set_filter(&mut self, key: &str, value: &str) -> StampedQuery {
        if value.is_empty() {
            self.query.filters.remove(key);
        } else {
            self.query
                .filters
                .insert(key.to_string(), value.to_string());
        }
        self.query.page = 1;
        self.stamp()
    }

    // --- Fetch outcome ---

    /// Accepts a fetch outcome. Returns false (and changes nothing) when
    /// the stamp has been superseded; a failure keeps the last good page
    /// and records the message for the error banner.
    pub fn apply(&mut self, stamp: &StampedQuery, outcome: Result<UserPage, ApiError>) -> bool {
        if stamp.seq != self.issued {
            return false;
        }
        match outcome {
            Ok(page) => {
                self.result = Some(page);
                self.phase = ListPhase::Ready;
                self.error = None;
            }
            Err(e) => {
                self.phase = ListPhase::Error;
                self.error = Some(e.message().to_string());
            }
        }
        true
    }

    // --- Mutation bookkeeping ---

    /// Settles local state after a confirmed server-side delete: drop the
    /// row, fix both totals, and step back one page when the last row of
    /// a page beyond the first disappears. The returned stamp, when
    /// present, is the refetch of that earlier page.
    pub fn remove_row(&mut self, id: u64) -> Option<StampedQuery> {
        let result = self.result.as_mut()?;
        let before = result.users.len();
        result.users.retain(|u| u.id != id);
        if result.users.len() == before {
            return None;
        }

        result.total_users = result.total_users.saturating_sub(1);
        result.total_pages = total_pages_for(result.total_users, self.query.page_size);

        if result.users.is_empty() && self.query.page > 1 {
            self.query.page -= 1;
            return Some(self.stamp());
        }
        None
    }

    fn stamp(&mut self) -> StampedQuery {
        self.issued += 1;
        self.phase = ListPhase::Loading;
        StampedQuery {
            seq: self.issued,
            query: self.query.clone(),
        }
    }
}

/// ceil(total / page_size); an empty collection has zero pages.
pub fn total_pages_for(total: u64, page_size: u32) -> u32 {
    let page_size = u64::from(page_size.max(1));
    total.div_ceil(page_size) as u32
}

#[cfg(test)]
mod tests;
