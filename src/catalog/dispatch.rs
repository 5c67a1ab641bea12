use anyhow::{Context, Result};
use tokio::runtime::{Builder, Runtime};
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::fetch::{RequestGeneration, Ticket};
use crate::models::{BookSummary, WorkDetail};
use crate::normalize::{normalize_all, normalize_work};

use super::client::CatalogClient;
use super::error::CatalogError;

/// A finished request, tagged with the ticket it was issued under.
#[derive(Debug)]
pub enum FetchOutcome {
    Search {
        ticket: Ticket,
        query: String,
        result: Result<Vec<BookSummary>, CatalogError>,
    },
    Work {
        ticket: Ticket,
        work_id: String,
        result: Result<WorkDetail, CatalogError>,
    },
}

impl FetchOutcome {
    pub fn ticket(&self) -> Ticket {
        match self {
            FetchOutcome::Search { ticket, .. } | FetchOutcome::Work { ticket, .. } => *ticket,
        }
    }
}

/// One independent stream of requests (search or work detail).
#[derive(Default)]
struct Lane {
    generation: RequestGeneration,
    in_flight: Option<JoinHandle<()>>,
}

impl Lane {
    fn begin(&mut self) -> Ticket {
        self.abort_in_flight();
        self.generation.issue()
    }

    fn cancel(&mut self) {
        self.abort_in_flight();
        self.generation.invalidate();
    }

    fn abort_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            if !handle.is_finished() {
                handle.abort();
            }
        }
    }
}

/// Runs catalog requests off the UI thread and hands results back through a
/// channel. Issuing a request on a lane supersedes the previous one: the old
/// task is aborted and any result it still manages to send is discarded when
/// drained.
pub struct Dispatcher {
    runtime: Runtime,
    client: CatalogClient,
    tx: UnboundedSender<FetchOutcome>,
    rx: UnboundedReceiver<FetchOutcome>,
    search: Lane,
    work: Lane,
}

impl Dispatcher {
    pub fn new(client: CatalogClient) -> Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("catalog-fetch")
            .enable_all()
            .build()
            .context("failed to start the fetch runtime")?;
        let (tx, rx) = mpsc::unbounded_channel();

        Ok(Self {
            runtime,
            client,
            tx,
            rx,
            search: Lane::default(),
            work: Lane::default(),
        })
    }

    /// Start a search for `query`, superseding any search still in flight.
    pub fn search(&mut self, query: &str) -> Ticket {
        let ticket = self.search.begin();
        let client = self.client.clone();
        let tx = self.tx.clone();
        let query = query.to_string();
        info!(%query, ticket = ticket.value(), "search issued");

        let handle = self.runtime.spawn(async move {
            let result = client.search_books(&query).await.map(normalize_all);
            if tx
                .send(FetchOutcome::Search {
                    ticket,
                    query,
                    result,
                })
                .is_err()
            {
                debug!("search finished after the dispatcher shut down");
            }
        });
        self.search.in_flight = Some(handle);
        ticket
    }

    /// Start loading a work's detail record.
    pub fn work(&mut self, work_id: &str) -> Ticket {
        let ticket = self.work.begin();
        let client = self.client.clone();
        let tx = self.tx.clone();
        let work_id = work_id.to_string();
        info!(%work_id, ticket = ticket.value(), "work detail issued");

        let handle = self.runtime.spawn(async move {
            let result = client.get_work_detail(&work_id).await.map(normalize_work);
            if tx
                .send(FetchOutcome::Work {
                    ticket,
                    work_id,
                    result,
                })
                .is_err()
            {
                debug!("work detail finished after the dispatcher shut down");
            }
        });
        self.work.in_flight = Some(handle);
        ticket
    }

    /// Drop whatever the detail view was waiting for.
    pub fn cancel_work(&mut self) {
        self.work.cancel();
    }

    /// Drain finished requests, keeping only those whose lane has not moved on
    /// since they were issued.
    pub fn drain(&mut self) -> Vec<FetchOutcome> {
        let mut ready = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(outcome) => {
                    if self.is_current(&outcome) {
                        ready.push(outcome);
                    } else {
                        debug!(ticket = outcome.ticket().value(), "discarding stale fetch result");
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        ready
    }

    pub fn is_current(&self, outcome: &FetchOutcome) -> bool {
        match outcome {
            FetchOutcome::Search { ticket, .. } => self.search.generation.is_current(*ticket),
            FetchOutcome::Work { ticket, .. } => self.work.generation.is_current(*ticket),
        }
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        self.search.cancel();
        self.work.cancel();
    }
}
