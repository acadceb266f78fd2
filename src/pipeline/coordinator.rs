// file: src/pipeline/coordinator.rs
// description: runs one directory search at a time on a background worker
// reference: coordinates file discovery, per-file scanning, progress and cancellation

use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::extractor::Capabilities;
use crate::matcher::Matcher;
use crate::models::report::ReportBuilder;
use crate::models::{Completion, SearchReport, SearchRequest};
use crate::pipeline::progress::{ProgressObserver, ProgressUpdate, SearchStats};
use crate::scanner::{DocumentScanner, FileWalker};
use crate::utils::validation::Validator;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinHandle;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchState {
    Idle,
    Running,
    Completed,
    Cancelled,
    Failed,
}

impl SearchState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Failed)
    }
}

/// Cooperative stop flag shared between a handle and its worker.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A running search. Dropping the handle does not stop the worker.
#[derive(Debug)]
pub struct SearchHandle {
    id: Uuid,
    cancel: CancelToken,
    progress: Option<UnboundedReceiver<ProgressUpdate>>,
    task: JoinHandle<Result<SearchReport>>,
}

impl SearchHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// The progress channel has a single consumer; later calls return `None`.
    pub fn take_progress(&mut self) -> Option<UnboundedReceiver<ProgressUpdate>> {
        self.progress.take()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub async fn wait(self) -> Result<SearchReport> {
        self.task
            .await
            .map_err(|e| SearchError::Worker(format!("Search worker failed: {}", e)))?
    }
}

pub struct SearchCoordinator {
    config: SearchConfig,
    capabilities: Capabilities,
    state: Arc<Mutex<SearchState>>,
}

impl Default for SearchCoordinator {
    fn default() -> Self {
        Self::new(SearchConfig::default(), Capabilities::default())
    }
}

impl SearchCoordinator {
    pub fn new(config: SearchConfig, capabilities: Capabilities) -> Self {
        Self {
            config,
            capabilities,
            state: Arc::new(Mutex::new(SearchState::Idle)),
        }
    }

    pub fn state(&self) -> SearchState {
        *lock_state(&self.state)
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Validates the request and hands it to a worker on the blocking pool.
    /// Must be called from within a Tokio runtime.
    pub fn start(&self, request: SearchRequest) -> Result<SearchHandle> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| SearchError::Worker(format!("No async runtime available: {}", e)))?;

        let matcher = {
            let mut state = lock_state(&self.state);
            if *state == SearchState::Running {
                return Err(SearchError::SearchAlreadyInProgress);
            }

            let prepared = Validator::validate_directory(&request.directory)
                .and_then(|_| Matcher::with_mode(&request.keywords, self.config.match_mode));
            match prepared {
                Ok(matcher) => {
                    *state = SearchState::Running;
                    matcher
                }
                Err(e) => {
                    *state = SearchState::Failed;
                    return Err(e);
                }
            }
        };

        let id = Uuid::new_v4();
        let cancel = CancelToken::new();
        let (tx, rx) = mpsc::unbounded_channel();

        info!(
            "Search {} started: [{}] in {}",
            id,
            request.keywords,
            request.directory.display()
        );

        let worker = SearchWorker {
            walker: FileWalker::new(self.config.clone()),
            scanner: DocumentScanner::new(matcher, self.capabilities),
            request,
        };
        let guard = StateGuard::new(self.state.clone());
        let token = cancel.clone();

        let task = runtime.spawn_blocking(move || {
            let outcome = worker.run(&token, &tx);
            let final_state = match &outcome {
                Ok(report) if report.is_cancelled() => SearchState::Cancelled,
                Ok(_) => SearchState::Completed,
                Err(e) => {
                    error!("Search {} failed: {}", id, e);
                    SearchState::Failed
                }
            };
            guard.finish(final_state);
            outcome
        });

        Ok(SearchHandle {
            id,
            cancel,
            progress: Some(rx),
            task,
        })
    }

    pub fn cancel(&self, handle: &SearchHandle) {
        info!("Cancelling search {}", handle.id());
        handle.cancel();
    }
}

struct SearchWorker {
    walker: FileWalker,
    scanner: DocumentScanner,
    request: SearchRequest,
}

impl SearchWorker {
    fn run(&self, cancel: &CancelToken, observer: &dyn ProgressObserver) -> Result<SearchReport> {
        let started = Instant::now();
        let mut builder = ReportBuilder::new(
            self.request.directory.clone(),
            self.request.keywords.clone(),
        );

        if cancel.is_cancelled() {
            return Ok(builder.finish(Completion::Cancelled, started.elapsed()));
        }

        let files = self.walker.collect(&self.request.directory)?;
        let total_files = files.len();
        builder.set_total_files(total_files);

        let mut completion = Completion::Completed;
        for file in &files {
            if cancel.is_cancelled() {
                info!(
                    "Search cancelled after {} of {} files",
                    builder.documents_scanned(),
                    total_files
                );
                completion = Completion::Cancelled;
                break;
            }

            let result = self.scanner.scan(file);
            let update = ProgressUpdate {
                files_processed: builder.documents_scanned() + 1,
                total_files,
                current_path: file.path.clone(),
                status: result.status,
                hits: result.hits.len(),
            };
            builder.record(result);
            observer.on_progress(&update);
        }

        let report = builder.finish(completion, started.elapsed());
        log_final_stats(&SearchStats::from_report(&report));
        Ok(report)
    }
}

/// Marks the search `Failed` if the worker unwinds before reporting.
struct StateGuard {
    state: Arc<Mutex<SearchState>>,
    finished: bool,
}

impl StateGuard {
    fn new(state: Arc<Mutex<SearchState>>) -> Self {
        Self {
            state,
            finished: false,
        }
    }

    fn finish(mut self, final_state: SearchState) {
        *lock_state(&self.state) = final_state;
        self.finished = true;
    }
}

impl Drop for StateGuard {
    fn drop(&mut self) {
        if !self.finished {
            *lock_state(&self.state) = SearchState::Failed;
        }
    }
}

fn lock_state(state: &Mutex<SearchState>) -> MutexGuard<'_, SearchState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn log_final_stats(stats: &SearchStats) {
    info!("=== Search Summary ===");
    info!("Duration: {:.2} seconds", stats.duration.as_secs_f64());
    info!("Files scanned: {}", stats.files_scanned);
    info!("Files matched: {}", stats.files_matched);
    info!("Unreadable or unsupported: {}", stats.files_with_problems);
    info!("Total hits: {}", stats.total_hits);
    info!("Throughput: {:.2} files/sec", stats.files_per_second());
}
