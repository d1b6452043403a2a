//! Lazy page loading and bulk actions.

use std::sync::atomic::Ordering;

use super::DataGrid;
use crate::error::GridError;
use crate::error::LoadError;
use crate::events::BulkActionHandler;
use crate::events::GridEvent;
use crate::pagination::LoadOutcome;
use crate::pagination::Page;
use crate::pagination::PageRequest;

impl DataGrid {
    /// `true` while a lazy page request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.read(|inner| inner.in_flight.is_some())
    }

    /// Issues a request for the current page and marks it in flight.
    ///
    /// Fails with [`GridError::LoadInFlight`] while another request is
    /// outstanding, so page N+1 is never requested before page N resolves.
    pub fn begin_load(&self) -> Result<PageRequest, GridError> {
        let request = {
            let mut inner = self.inner.write().map_err(|_| GridError::Poisoned)?;
            if !inner.pagination.is_lazy() {
                return Err(GridError::NotLazy);
            }
            if inner.in_flight.is_some() {
                return Err(GridError::LoadInFlight);
            }
            inner.next_ticket += 1;
            let request = PageRequest {
                page: inner.pagination.current_page(),
                page_size: inner.pagination.page_size(),
                filters: inner.filters.active().to_vec(),
                sort: inner.sorter.current().cloned(),
                generation: inner.generation,
                ticket: inner.next_ticket,
            };
            inner.in_flight = Some(request.clone());
            request
        };
        self.dirty.store(true, Ordering::SeqCst);
        log::trace!("requesting page {} (size {})", request.page, request.page_size);
        Ok(request)
    }

    /// Applies the response to `request`.
    ///
    /// The in-flight flag is always released. Responses for a page, page size
    /// or filter/sort generation that is no longer current are discarded as
    /// [`LoadOutcome::Stale`]. On failure the previous page stays displayed,
    /// the listener is told and the error is returned.
    pub fn complete_load(
        &self,
        request: &PageRequest,
        result: Result<Page, LoadError>,
    ) -> Result<LoadOutcome, GridError> {
        let mut events = Vec::new();
        let outcome = {
            let mut inner = self.inner.write().map_err(|_| GridError::Poisoned)?;
            if inner
                .in_flight
                .as_ref()
                .is_some_and(|pending| pending.ticket == request.ticket)
            {
                inner.in_flight = None;
            }

            let current = inner.pagination.current_page() == request.page
                && inner.pagination.page_size() == request.page_size
                && inner.generation == request.generation;
            if !current {
                log::debug!(
                    "discarding stale response for page {} (size {})",
                    request.page,
                    request.page_size
                );
                Ok(LoadOutcome::Stale)
            } else {
                result.map(|page| {
                    let total_items = page.total_items();
                    let entries = inner.identity.assign(page.into_rows(), request.offset());
                    let rows = entries.len();
                    inner.apply_page(entries, total_items);
                    events.push(GridEvent::PageChange(inner.page_info()));
                    LoadOutcome::Applied { rows, total_items }
                })
            }
        };
        self.dirty.store(true, Ordering::SeqCst);

        match outcome {
            Ok(outcome) => {
                self.emit(&events);
                Ok(outcome)
            }
            Err(error) => {
                log::warn!("page {} failed to load: {error}", request.page);
                if let Some(listener) = &self.listener {
                    listener.on_load_error(&error);
                }
                Err(error.into())
            }
        }
    }

    /// Loads the current page through the attached loader.
    ///
    /// If the grid moved to different parameters while the request was
    /// outstanding, the stale response is dropped and the current page is
    /// requested again.
    ///
    /// Dropping the returned future before it resolves releases the in-flight
    /// flag, so a later load can proceed.
    pub async fn load(&self) -> Result<LoadOutcome, GridError> {
        let loader = self.loader.clone().ok_or(GridError::NoLoader)?;
        loop {
            let request = self.begin_load()?;
            let mut guard = InFlightGuard {
                grid: self,
                request: Some(&request),
            };
            let result = loader.load_page(&request).await;
            guard.request = None;
            match self.complete_load(&request, result)? {
                LoadOutcome::Stale => continue,
                applied => return Ok(applied),
            }
        }
    }

    /// Abandons `request` without applying a response.
    ///
    /// Releases the in-flight flag if `request` still holds it. Returns `true`
    /// if it did.
    pub fn cancel_load(&self, request: &PageRequest) -> bool {
        let released = self.update(|inner, _| {
            if inner
                .in_flight
                .as_ref()
                .is_some_and(|pending| pending.ticket == request.ticket)
            {
                inner.in_flight = None;
                true
            } else {
                false
            }
        });
        if released {
            log::debug!("cancelled request for page {}", request.page);
        }
        released
    }

    /// Moves to `page` and loads it.
    ///
    /// Out-of-range pages are ignored and reported as
    /// [`LoadOutcome::OutOfRange`].
    pub async fn load_page(&self, page: usize) -> Result<LoadOutcome, GridError> {
        let current = self.page_info().current_page;
        if page != current && !self.go_to_page(page) {
            log::debug!("page {page} is out of range");
            return Ok(LoadOutcome::OutOfRange);
        }
        self.load().await
    }

    /// Hands the selected rows to `handler`.
    ///
    /// On success the rows that were handed over are deselected and their
    /// count returned; rows selected while the handler ran stay selected. On
    /// failure the selection is left untouched. With nothing selected the
    /// handler is not called.
    pub async fn run_bulk_action(
        &self,
        action_id: &str,
        handler: &dyn BulkActionHandler,
    ) -> Result<usize, GridError> {
        let (ids, rows) =
            self.read(|inner| (inner.selection.ids().to_vec(), inner.selected_rows()));
        if ids.is_empty() {
            log::debug!("bulk action {action_id} skipped: nothing selected");
            return Ok(0);
        }

        let count = rows.len();
        if let Err(error) = handler.on_bulk_action(action_id, rows).await {
            log::warn!("bulk action {action_id} failed: {error}");
            return Err(error.into());
        }

        self.update(|inner, events| {
            let mut changed = false;
            for id in &ids {
                changed |= inner.selection.select(id, false);
            }
            if changed {
                events.push(GridEvent::SelectionChange(inner.selection.ids().to_vec()));
            }
        });
        log::debug!("bulk action {action_id} handled {count} rows");
        Ok(count)
    }
}

/// Releases the in-flight flag if a load is dropped mid-request.
struct InFlightGuard<'a> {
    grid: &'a DataGrid,
    request: Option<&'a PageRequest>,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if let Some(request) = self.request.take() {
            self.grid.cancel_load(request);
        }
    }
}
