//! Scanner module - concurrent repository scanning.
//!
//! A single walker thread prunes and enumerates the tree, feeding file
//! entries into a bounded channel consumed by a pool of worker threads.
//! Workers record existence, filter out ignored/binary/oversized files,
//! and run every registered detector against the surviving content.
//! All shared state lives in the [`SignalStore`] monitor, so workers
//! need no locking of their own.

pub mod detectors;
pub mod ignore;
pub mod signals;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use crossbeam::channel;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::ScanError;

pub use detectors::{Detector, DetectorRegistry};
pub use ignore::{load_ignore_file, IgnoreMatcher};
pub use signals::SignalStore;

/// Files at or above this size never have their content captured.
const MAX_CONTENT_BYTES: u64 = 200_000;

/// Capacity of the walker-to-workers channel.
const WORK_QUEUE_CAPACITY: usize = 128;

/// Extensions that are always binary; their content is never read.
const BINARY_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "pdf", "zip", "tar", "gz", "mp4", "mp3", "mov", "exe",
];

/// Trace hook for scan internals. Implementations receive one line per
/// event; the default [`NoopLogger`] makes the hook free when unused.
pub trait ScanLogger: Send + Sync {
    /// Receive one trace line.
    fn line(&self, message: &str);
}

/// Logger that discards everything.
pub struct NoopLogger;

impl ScanLogger for NoopLogger {
    fn line(&self, _message: &str) {}
}

/// Logger that forwards trace lines to the `tracing` stack at debug
/// level.
pub struct TracingLogger;

impl ScanLogger for TracingLogger {
    fn line(&self, message: &str) {
        debug!(target: "prodlens::scanner", "{message}");
    }
}

/// Options controlling a repository scan.
pub struct ScanOptions {
    /// Emit per-file trace lines through the logger.
    pub debug: bool,
    /// Trace sink; defaults to a no-op.
    pub logger: Arc<dyn ScanLogger>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            debug: false,
            logger: Arc::new(NoopLogger),
        }
    }
}

impl ScanOptions {
    fn trace(&self, message: &str) {
        if self.debug {
            self.logger.line(message);
        }
    }
}

/// One file handed from the walker to the workers.
struct ScanWork {
    path: PathBuf,
    rel: String,
    size: u64,
}

/// Scan the repository with the default detector set and the ignore
/// patterns read from `.plignore` at the root.
pub fn scan_repo(root: &Path) -> Result<SignalStore, ScanError> {
    scan_repo_with_options(root, ScanOptions::default())
}

/// Scan the repository with custom options.
pub fn scan_repo_with_options(root: &Path, options: ScanOptions) -> Result<SignalStore, ScanError> {
    let patterns = load_ignore_file(root);
    let registry = DetectorRegistry::default_set();
    scan(root, &patterns, &registry, &options)
}

/// Scan `root`, applying `ignore_patterns` and running every detector
/// in `registry` against each surviving file's content.
///
/// Per-entry problems (unreadable files, permission errors, binary or
/// oversized content) are skipped silently; the only fatal conditions
/// are an inaccessible root or a walk failure at the root itself.
pub fn scan(
    root: &Path,
    ignore_patterns: &[String],
    registry: &DetectorRegistry,
    options: &ScanOptions,
) -> Result<SignalStore, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::RootNotFound {
            path: root.to_path_buf(),
        });
    }

    let matcher = IgnoreMatcher::new(ignore_patterns);

    if options.debug && !matcher.is_empty() {
        options.trace("=== Ignore patterns ===");
        for pattern in matcher.raw_patterns() {
            options.trace(&format!("Pattern: {pattern}"));
        }
    }

    let store = SignalStore::new();
    let cancelled = AtomicBool::new(false);
    let fatal: Mutex<Option<ScanError>> = Mutex::new(None);

    let worker_count = worker_count();
    let (tx, rx) = channel::bounded::<ScanWork>(WORK_QUEUE_CAPACITY);

    thread::scope(|scope| {
        for _ in 0..worker_count {
            let rx = rx.clone();
            let store = &store;
            let matcher = &matcher;
            let cancelled = &cancelled;
            scope.spawn(move || {
                while let Ok(work) = rx.recv() {
                    // Keep draining after cancellation so the walker
                    // never blocks on a full channel.
                    if cancelled.load(Ordering::Relaxed) {
                        continue;
                    }
                    process_file(&work, matcher, registry, options, store);
                }
            });
        }

        // The walker runs on the current thread and owns the sender;
        // dropping it at the end of the scope lets the workers exit.
        walk(root, &matcher, options, &tx, &cancelled, &fatal);
        drop(tx);
    });

    if let Some(err) = fatal.into_inner().unwrap_or_else(|e| e.into_inner()) {
        return Err(err);
    }

    if options.debug {
        options.trace("=== Summary ===");
        options.trace(&format!("Total files: {}", store.file_count()));
        options.trace(&format!("Files with content: {}", store.content_count()));
    }

    Ok(store)
}

/// Worker pool size: twice the host parallelism, with a floor so small
/// machines still overlap I/O and detection.
fn worker_count() -> usize {
    let cpus = thread::available_parallelism().map(|n| n.get()).unwrap_or(2);
    (cpus * 2).max(4)
}

/// Walk the tree, prune directories, and feed files to the workers.
fn walk(
    root: &Path,
    matcher: &IgnoreMatcher,
    options: &ScanOptions,
    tx: &channel::Sender<ScanWork>,
    cancelled: &AtomicBool,
    fatal: &Mutex<Option<ScanError>>,
) {
    let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
        if !entry.file_type().is_dir() {
            return true;
        }
        if entry.depth() == 0 {
            return true;
        }
        if ignore::is_default_ignored_dir(&entry.file_name().to_string_lossy()) {
            return false;
        }
        match relative_path(root, entry.path()) {
            Some(rel) => !matcher.is_ignored(&rel),
            None => false,
        }
    });

    for entry in walker {
        if cancelled.load(Ordering::Relaxed) {
            return;
        }

        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                // An error at depth zero means the root itself cannot
                // be walked; anything deeper is a per-entry problem.
                if err.depth() == 0 {
                    let mut fatal = fatal.lock().unwrap_or_else(|e| e.into_inner());
                    if fatal.is_none() {
                        *fatal = Some(ScanError::Walk {
                            path: root.to_path_buf(),
                            source: err,
                        });
                    }
                    cancelled.store(true, Ordering::Relaxed);
                    return;
                }
                options.trace(&format!("Skipping unreadable entry: {err}"));
                continue;
            }
        };

        if entry.file_type().is_dir() {
            continue;
        }

        let Some(rel) = relative_path(root, entry.path()) else {
            continue;
        };
        let size = match entry.metadata() {
            Ok(metadata) => metadata.len(),
            Err(_) => continue,
        };

        let work = ScanWork {
            path: entry.path().to_path_buf(),
            rel,
            size,
        };
        if tx.send(work).is_err() {
            return;
        }
    }
}

/// Slash-normalized path relative to the scan root.
fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let rel = rel.to_str()?;
    if rel.is_empty() {
        return None;
    }
    Some(rel.replace('\\', "/"))
}

/// Handle one file: record existence, apply filters, capture content,
/// run detectors. Every failure here is recoverable and only skips the
/// file.
fn process_file(
    work: &ScanWork,
    matcher: &IgnoreMatcher,
    registry: &DetectorRegistry,
    options: &ScanOptions,
    store: &SignalStore,
) {
    options.trace(&format!("Processing: {}", work.rel));

    // Existence is tracked even for files whose content never gets
    // captured; `file_exists` predicates rely on this.
    store.record_file(&work.rel);

    if matcher.is_ignored(&work.rel) {
        options.trace("  -> ignored");
        return;
    }

    if let Some(ext) = detectors::extension(&work.rel) {
        if BINARY_EXTENSIONS.contains(&ext.as_str()) {
            options.trace("  -> skipped (binary extension)");
            return;
        }
    }

    if work.size >= MAX_CONTENT_BYTES {
        options.trace("  -> skipped (too large)");
        return;
    }

    let Ok(bytes) = std::fs::read(&work.path) else {
        options.trace("  -> skipped (unreadable)");
        return;
    };
    if bytes.contains(&0) {
        options.trace("  -> skipped (binary content)");
        return;
    }

    let content = String::from_utf8_lossy(&bytes).into_owned();
    store.set_content(&work.rel, content.clone());
    options.trace("  -> content captured");

    registry.run_all(&content, &work.rel, store);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::tempdir;

    struct CollectingLogger {
        lines: Mutex<Vec<String>>,
    }

    impl ScanLogger for CollectingLogger {
        fn line(&self, message: &str) {
            self.lines
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(message.to_string());
        }
    }

    #[test]
    fn test_scan_records_files_and_content() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("main.rs"), "fn main() {}").unwrap();
        fs::create_dir(root.join("sub")).unwrap();
        fs::write(root.join("sub/nested.txt"), "hello").unwrap();

        let store = scan_repo(root).unwrap();

        assert!(store.has_file("main.rs"));
        assert!(store.has_file("sub/nested.txt"));
        assert_eq!(store.content("main.rs").as_deref(), Some("fn main() {}"));
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let err = scan_repo(&missing).unwrap_err();
        assert!(matches!(err, ScanError::RootNotFound { .. }));
    }

    #[test]
    fn test_ignored_file_exists_without_content() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("secret.txt"), "data").unwrap();
        fs::write(root.join("kept.txt"), "data").unwrap();

        let patterns = vec!["secret.txt".to_string()];
        let registry = DetectorRegistry::default_set();
        let store = scan(root, &patterns, &registry, &ScanOptions::default()).unwrap();

        assert!(store.has_file("secret.txt"));
        assert_eq!(store.content("secret.txt"), None);
        assert!(store.content("kept.txt").is_some());
    }

    #[test]
    fn test_ignored_directory_is_pruned_entirely() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("vendor")).unwrap();
        fs::write(root.join("vendor/lib.js"), "code").unwrap();
        fs::write(root.join("app.js"), "code").unwrap();

        let patterns = vec!["vendor/".to_string()];
        let registry = DetectorRegistry::default_set();
        let store = scan(root, &patterns, &registry, &ScanOptions::default()).unwrap();

        // Pruned subtrees are never visited, so not even existence is
        // recorded for their files.
        assert!(!store.has_file("vendor/lib.js"));
        assert!(store.has_file("app.js"));
    }

    #[test]
    fn test_default_denied_dirs_are_pruned() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("node_modules")).unwrap();
        fs::write(root.join("node_modules/pkg.js"), "code").unwrap();
        fs::write(root.join("index.js"), "code").unwrap();

        let store = scan_repo(root).unwrap();

        assert!(!store.has_file("node_modules/pkg.js"));
        assert!(store.has_file("index.js"));
    }

    #[test]
    fn test_binary_extension_skips_content() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("logo.png"), b"\x89PNG").unwrap();

        let store = scan_repo(root).unwrap();

        assert!(store.has_file("logo.png"));
        assert_eq!(store.content("logo.png"), None);
    }

    #[test]
    fn test_nul_byte_content_is_skipped() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("blob.dat"), b"text\0more").unwrap();

        let store = scan_repo(root).unwrap();

        assert!(store.has_file("blob.dat"));
        assert_eq!(store.content("blob.dat"), None);
    }

    #[test]
    fn test_oversized_file_is_skipped() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("big.txt"), "x".repeat(250_000)).unwrap();

        let store = scan_repo(root).unwrap();

        assert!(store.has_file("big.txt"));
        assert_eq!(store.content("big.txt"), None);
    }

    #[test]
    fn test_detectors_run_during_scan() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("main.tf"),
            "provider \"aws\" {\n  region = \"us-east-1\"\n}\n",
        )
        .unwrap();

        let store = scan_repo(root).unwrap();

        assert!(store.get_bool("infra_as_code_detected"));
        assert_eq!(store.get_int("region_count"), 1);
    }

    #[test]
    fn test_plignore_file_is_honored() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join(".plignore"), "*.log\n").unwrap();
        fs::write(root.join("trace.log"), "noise").unwrap();
        fs::write(root.join("main.rs"), "fn main() {}").unwrap();

        let store = scan_repo(root).unwrap();

        assert!(store.has_file("trace.log"));
        assert_eq!(store.content("trace.log"), None);
        assert!(store.content("main.rs").is_some());
    }

    #[test]
    fn test_debug_logger_receives_trace() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("a.txt"), "hello").unwrap();

        let logger = Arc::new(CollectingLogger {
            lines: Mutex::new(Vec::new()),
        });
        let options = ScanOptions {
            debug: true,
            logger: logger.clone(),
        };
        let registry = DetectorRegistry::default_set();
        scan(root, &[], &registry, &options).unwrap();

        let lines = logger.lines.lock().unwrap();
        assert!(lines.iter().any(|l| l.contains("Processing: a.txt")));
        assert!(lines.iter().any(|l| l.contains("Total files: 1")));
    }

    #[test]
    fn test_no_logger_is_a_noop() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "hello").unwrap();
        // Default options carry the noop logger; the scan must succeed
        // without any logging wiring.
        assert!(scan_repo(dir.path()).is_ok());
    }
}
