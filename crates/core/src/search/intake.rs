//! Debounced query intake.
//!
//! Keystrokes do not run the pipeline directly. Each one (re)arms a
//! deadline; only when the deadline passes without further input is the
//! latest filter state committed. [`QueryIntake`] is the state machine on
//! its own, driven by explicit instants. [`DebouncedSearch`] runs it on a
//! tokio task against a [`GlobalSearch`].

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

use super::engine::{GlobalSearch, SearchOutcome};
use super::filter::FilterState;

/// Intake state.
#[derive(Debug, Clone, PartialEq)]
pub enum IntakeState {
    /// Nothing pending.
    Idle,
    /// A keystroke arrived; the commit fires at `deadline` unless more input
    /// comes first.
    Pending {
        filters: FilterState,
        deadline: Instant,
    },
    /// The last pending input was handed to the pipeline.
    Committed { filters: FilterState },
}

/// What a keystroke did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeEvent {
    /// A commit is scheduled at the returned deadline (any earlier one is
    /// cancelled).
    Armed(Instant),
    /// The query is empty: pending work was cancelled and results should be
    /// cleared right away.
    Cleared,
}

#[derive(Debug, Clone)]
pub struct QueryIntake {
    delay: Duration,
    state: IntakeState,
}

impl QueryIntake {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            state: IntakeState::Idle,
        }
    }

    pub fn state(&self) -> &IntakeState {
        &self.state
    }

    /// Deadline of the pending commit, if any.
    pub fn deadline(&self) -> Option<Instant> {
        match &self.state {
            IntakeState::Pending { deadline, .. } => Some(*deadline),
            _ => None,
        }
    }

    /// Register a keystroke. Last keystroke wins.
    pub fn input(&mut self, filters: FilterState, now: Instant) -> IntakeEvent {
        if filters.query.trim().is_empty() {
            self.state = IntakeState::Idle;
            return IntakeEvent::Cleared;
        }

        let deadline = now + self.delay;
        self.state = IntakeState::Pending { filters, deadline };
        IntakeEvent::Armed(deadline)
    }

    /// Commit the pending input if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<FilterState> {
        match &self.state {
            IntakeState::Pending { filters, deadline } if now >= *deadline => {
                let filters = filters.clone();
                self.state = IntakeState::Committed {
                    filters: filters.clone(),
                };
                Some(filters)
            }
            _ => None,
        }
    }
}

/// What the driver publishes to the presentation side.
#[derive(Debug, Clone, PartialEq)]
pub enum IntakeUpdate {
    /// Clear the result list.
    Cleared,
    /// A committed query and its outcome.
    Committed {
        filters: FilterState,
        outcome: SearchOutcome,
    },
}

/// Debounced search running on a background task.
///
/// Dropping the handle closes the input channel and stops the task.
pub struct DebouncedSearch {
    input_tx: mpsc::UnboundedSender<FilterState>,
    task: JoinHandle<()>,
}

impl DebouncedSearch {
    /// Spawn the driver. Updates are delivered on the returned receiver.
    pub fn spawn(
        search: Arc<GlobalSearch>,
        delay: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<IntakeUpdate>) {
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        let intake = QueryIntake::new(delay);
        let task = tokio::spawn(run_intake(search, intake, input_rx, update_tx));

        (Self { input_tx, task }, update_rx)
    }

    /// Feed the current input. Returns false if the driver has stopped.
    pub fn keystroke(&self, filters: FilterState) -> bool {
        self.input_tx.send(filters).is_ok()
    }

    /// Stop accepting input and wait for the driver to finish.
    ///
    /// A commit that is still pending is dropped.
    pub async fn shutdown(self) {
        drop(self.input_tx);
        let _ = self.task.await;
    }
}

async fn run_intake(
    search: Arc<GlobalSearch>,
    mut intake: QueryIntake,
    mut input_rx: mpsc::UnboundedReceiver<FilterState>,
    update_tx: mpsc::UnboundedSender<IntakeUpdate>,
) {
    loop {
        let deadline = intake.deadline();

        tokio::select! {
            received = input_rx.recv() => {
                let Some(filters) = received else {
                    break;
                };
                if intake.input(filters, Instant::now()) == IntakeEvent::Cleared
                    && update_tx.send(IntakeUpdate::Cleared).is_err()
                {
                    break;
                }
            }
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                let Some(filters) = intake.poll(Instant::now()) else {
                    continue;
                };
                debug!("Committing debounced query '{}'", filters.query);
                let outcome = search.search(&filters).await;
                let update = IntakeUpdate::Committed { filters, outcome };
                if update_tx.send(update).is_err() {
                    break;
                }
            }
        }
    }

    debug!("Query intake stopped");
}
