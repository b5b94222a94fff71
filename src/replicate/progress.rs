// file: src/replicate/progress.rs
// description: progress tracking and statistics reporting for replication runs
// reference: uses indicatif for progress bars and tracks upload metrics

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct ReplicationStats {
    pub objects_uploaded: usize,
    pub bytes_uploaded: u64,
    pub duration_secs: u64,
}

impl ReplicationStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn objects_per_second(&self) -> f64 {
        if self.duration_secs == 0 {
            return 0.0;
        }
        self.objects_uploaded as f64 / self.duration_secs as f64
    }

    pub fn bytes_per_second(&self) -> f64 {
        if self.duration_secs == 0 {
            return 0.0;
        }
        self.bytes_uploaded as f64 / self.duration_secs as f64
    }
}

pub struct ReplicationProgress {
    bar: ProgressBar,
    objects_uploaded: Arc<AtomicUsize>,
    bytes_uploaded: Arc<AtomicU64>,
    start_time: Instant,
}

impl ReplicationProgress {
    pub fn new(total_objects: usize) -> Self {
        Self::with_color(total_objects, true)
    }

    pub fn with_color(total_objects: usize, colored: bool) -> Self {
        Self {
            bar: create_progress_bar(total_objects as u64, colored),
            objects_uploaded: Arc::new(AtomicUsize::new(0)),
            bytes_uploaded: Arc::new(AtomicU64::new(0)),
            start_time: Instant::now(),
        }
    }

    pub fn object_uploaded(&self, key: &str, bytes: u64) {
        self.objects_uploaded.fetch_add(1, Ordering::SeqCst);
        self.bytes_uploaded.fetch_add(bytes, Ordering::SeqCst);
        self.bar.set_message(key.to_string());
        self.bar.inc(1);
    }

    pub fn finish(&self) {
        self.bar.finish_with_message("Replication complete");
    }

    pub fn get_stats(&self) -> ReplicationStats {
        ReplicationStats {
            objects_uploaded: self.objects_uploaded.load(Ordering::SeqCst),
            bytes_uploaded: self.bytes_uploaded.load(Ordering::SeqCst),
            duration_secs: self.start_time.elapsed().as_secs(),
        }
    }
}

fn create_progress_bar(total: u64, colored: bool) -> ProgressBar {
    let bar = ProgressBar::new(total);
    if colored {
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
                )
                .expect("Failed to create progress bar template")
                .progress_chars("█▓▒░"),
        );
    } else {
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({eta}) {msg}")
                .expect("Failed to create progress bar template")
                .progress_chars("=>-"),
        );
    }
    bar
}
