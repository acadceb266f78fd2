// file: src/pipeline/progress.rs
// description: progress notifications, terminal progress bars and search statistics
// reference: uses indicatif for progress bars and tracks processing metrics

use crate::models::{DocumentStatus, SearchReport};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Sent once per finished file. Counters are copies, never views into the
/// report under construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub files_processed: usize,
    pub total_files: usize,
    pub current_path: PathBuf,
    pub status: DocumentStatus,
    pub hits: usize,
}

impl ProgressUpdate {
    pub fn fraction(&self) -> f64 {
        if self.total_files == 0 {
            return 1.0;
        }
        self.files_processed as f64 / self.total_files as f64
    }
}

/// Receives progress from the search worker thread.
pub trait ProgressObserver: Send {
    fn on_progress(&self, update: &ProgressUpdate);
}

impl ProgressObserver for UnboundedSender<ProgressUpdate> {
    fn on_progress(&self, update: &ProgressUpdate) {
        // A dropped receiver only means nobody is watching.
        let _ = self.send(update.clone());
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchStats {
    pub files_scanned: usize,
    pub files_matched: usize,
    pub files_with_problems: usize,
    pub total_hits: usize,
    pub duration: Duration,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_report(report: &SearchReport) -> Self {
        Self {
            files_scanned: report.documents_scanned,
            files_matched: report.documents_matched.len(),
            files_with_problems: report.diagnostics.len(),
            total_hits: report.total_hits(),
            duration: report.duration(),
        }
    }

    pub fn files_per_second(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.files_scanned as f64 / secs
    }

    /// Percentage of scanned files that had at least one hit.
    pub fn match_rate(&self) -> f64 {
        if self.files_scanned == 0 {
            return 0.0;
        }
        (self.files_matched as f64 / self.files_scanned as f64) * 100.0
    }
}

pub struct ProgressTracker {
    main_bar: ProgressBar,
    detail_bar: ProgressBar,
    files_matched: AtomicUsize,
    files_with_problems: AtomicUsize,
}

impl ProgressTracker {
    pub fn new(colored: bool) -> Self {
        let multi_progress = MultiProgress::new();

        let main_bar = create_progress_bar(&multi_progress, colored);
        let detail_bar = create_detail_bar(&multi_progress);

        Self::from_bars(main_bar, detail_bar)
    }

    /// Tracker that counts but never draws.
    pub fn hidden() -> Self {
        Self::from_bars(ProgressBar::hidden(), ProgressBar::hidden())
    }

    fn from_bars(main_bar: ProgressBar, detail_bar: ProgressBar) -> Self {
        Self {
            main_bar,
            detail_bar,
            files_matched: AtomicUsize::new(0),
            files_with_problems: AtomicUsize::new(0),
        }
    }

    pub fn record(&self, update: &ProgressUpdate) {
        if update.status == DocumentStatus::Ok && update.hits > 0 {
            self.files_matched.fetch_add(1, Ordering::SeqCst);
        } else if update.status != DocumentStatus::Ok {
            self.files_with_problems.fetch_add(1, Ordering::SeqCst);
        }

        self.main_bar.set_length(update.total_files as u64);
        self.main_bar.set_position(update.files_processed as u64);
        self.main_bar
            .set_message(update.current_path.display().to_string());
        self.update_detail_bar();
    }

    pub fn files_matched(&self) -> usize {
        self.files_matched.load(Ordering::SeqCst)
    }

    pub fn files_with_problems(&self) -> usize {
        self.files_with_problems.load(Ordering::SeqCst)
    }

    pub fn position(&self) -> u64 {
        self.main_bar.position()
    }

    pub fn finish(&self) {
        self.main_bar.finish_and_clear();
        self.detail_bar.finish_and_clear();
    }

    fn update_detail_bar(&self) {
        let message = format!(
            "Matched: {} | Unreadable/unsupported: {}",
            self.files_matched(),
            self.files_with_problems()
        );
        self.detail_bar.set_message(message);
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(multi_progress: &MultiProgress, colored: bool) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(0));
    let template = if colored {
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {wide_msg}"
    } else {
        "{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} {wide_msg}"
    };
    match ProgressStyle::default_bar().template(template) {
        Ok(style) => bar.set_style(style.progress_chars(if colored { "█▓▒░" } else { "=>-" })),
        Err(_) => bar.set_style(ProgressStyle::default_bar()),
    }
    bar
}

fn create_detail_bar(multi_progress: &MultiProgress) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(0));
    if let Ok(style) = ProgressStyle::default_bar().template("{msg}") {
        bar.set_style(style);
    }
    bar
}
