//! Viewing session
//!
//! Consumes a snapshot feed and keeps a dashboard current. Each received
//! snapshot replaces the previous one and the view is rebuilt from scratch.

use std::sync::mpsc::{Receiver, RecvError, RecvTimeoutError, TryRecvError};
use std::sync::Arc;
use std::time::Duration;

use crate::config::ReportTitles;
use crate::models::{SessionContext, Snapshot};
use crate::services::filter::FilterState;

use super::dashboard::DashboardView;

/// One session's transient state over a snapshot channel
pub struct ViewSession {
    session: SessionContext,
    filter: FilterState,
    titles: ReportTitles,
    snapshot: Option<Arc<Snapshot>>,
    receiver: Receiver<Arc<Snapshot>>,
}

impl ViewSession {
    pub fn new(session: SessionContext, receiver: Receiver<Arc<Snapshot>>) -> Self {
        Self {
            session,
            filter: FilterState::default(),
            titles: ReportTitles::default(),
            snapshot: None,
            receiver,
        }
    }

    pub fn with_titles(mut self, titles: ReportTitles) -> Self {
        self.titles = titles;
        self
    }

    pub fn with_filter(mut self, filter: FilterState) -> Self {
        self.filter = filter;
        self
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Block until the next snapshot; `None` once the feed is gone
    pub fn next_view(&mut self) -> Option<DashboardView> {
        let snapshot = self.receiver.recv().ok()?;
        self.snapshot = Some(snapshot);
        self.current_view()
    }

    /// Like [`next_view`](Self::next_view) with a deadline.
    ///
    /// `Ok(None)` means nothing arrived in time; an error means the feed
    /// disconnected.
    pub fn next_view_timeout(
        &mut self,
        timeout: Duration,
    ) -> Result<Option<DashboardView>, RecvError> {
        match self.receiver.recv_timeout(timeout) {
            Ok(snapshot) => {
                self.snapshot = Some(snapshot);
                Ok(self.current_view())
            }
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(RecvError),
        }
    }

    /// Drain pending snapshots, keeping only the latest
    ///
    /// Returns a rebuilt view if anything arrived.
    pub fn try_update(&mut self) -> Option<DashboardView> {
        let mut latest = None;
        loop {
            match self.receiver.try_recv() {
                Ok(snapshot) => latest = Some(snapshot),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        self.snapshot = Some(latest?);
        self.current_view()
    }

    /// Change filters and rebuild against the latest snapshot
    pub fn set_filter(&mut self, filter: FilterState) -> Option<DashboardView> {
        self.filter = filter;
        self.current_view()
    }

    /// View over the latest snapshot, if one has arrived
    pub fn current_view(&self) -> Option<DashboardView> {
        let snapshot = self.snapshot.as_deref()?;
        Some(DashboardView::build_with_titles(
            snapshot,
            &self.session,
            &self.filter,
            &self.titles,
        ))
    }
}
