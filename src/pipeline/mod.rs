// file: src/pipeline/mod.rs
// description: pipeline module exports and public api
// reference: search coordination

mod coordinator;
mod progress;

pub use coordinator::{CancelToken, SearchCoordinator, SearchHandle, SearchState};
pub use progress::{ProgressObserver, ProgressTracker, ProgressUpdate, SearchStats};
