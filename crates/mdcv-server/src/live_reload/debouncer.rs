//! Reload debouncing.
//!
//! Editors save with several filesystem events in quick succession
//! (truncate, write, rename). Every event for an input extends its
//! quiet period; once an input has been quiet long enough, a single
//! reload is emitted for it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// The two inputs the preview page re-reads on every request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum WatchedInput {
    /// The markdown CV document.
    Document,
    /// The compiled stylesheet.
    Stylesheet,
}

impl WatchedInput {
    /// Classify a changed file by extension. Everything that is not a
    /// stylesheet counts as document content.
    #[must_use]
    pub(crate) fn classify(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("css") => Self::Stylesheet,
            _ => Self::Document,
        }
    }

    /// Name used in the reload message sent to the browser.
    #[must_use]
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Stylesheet => "stylesheet",
        }
    }
}

/// A debounced reload, ready to broadcast.
#[derive(Clone, Debug)]
pub(crate) struct PendingReload {
    pub input: WatchedInput,
    pub path: PathBuf,
}

/// Collapses bursts of filesystem events into one reload per input.
///
/// Keyed by input rather than by path: the browser performs a full
/// page reload either way, so two quick saves of different markdown
/// files still produce a single document reload.
pub(crate) struct ReloadDebouncer {
    pending: Mutex<HashMap<WatchedInput, (PathBuf, Instant)>>,
    quiet_period: Duration,
}

impl ReloadDebouncer {
    pub(crate) fn new(quiet_period: Duration) -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
            quiet_period,
        }
    }

    /// Record a filesystem event for an input.
    ///
    /// Thread-safe, called from the notify callback. The latest path
    /// wins and the input's deadline is pushed back.
    pub(crate) fn record(&self, input: WatchedInput, path: PathBuf) {
        let deadline = Instant::now() + self.quiet_period;
        let mut pending = self.pending.lock().unwrap();
        pending.insert(input, (path, deadline));
    }

    /// Take the inputs whose quiet period has elapsed.
    pub(crate) fn drain_ready(&self) -> Vec<PendingReload> {
        let mut pending = self.pending.lock().unwrap();
        let now = Instant::now();

        let ready: Vec<WatchedInput> = pending
            .iter()
            .filter(|(_, (_, deadline))| *deadline <= now)
            .map(|(input, _)| *input)
            .collect();

        ready
            .into_iter()
            .filter_map(|input| {
                let (path, _) = pending.remove(&input)?;
                Some(PendingReload { input, path })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::thread;

    #[test]
    fn test_classify_by_extension() {
        assert_eq!(
            WatchedInput::classify(Path::new("cv.md")),
            WatchedInput::Document
        );
        assert_eq!(
            WatchedInput::classify(Path::new("dist/output.css")),
            WatchedInput::Stylesheet
        );
        assert_eq!(
            WatchedInput::classify(Path::new("notes")),
            WatchedInput::Document
        );
    }

    #[test]
    fn test_reload_waits_for_quiet_period() {
        let debouncer = ReloadDebouncer::new(Duration::from_millis(10));
        debouncer.record(WatchedInput::Document, PathBuf::from("cv.md"));

        assert!(debouncer.drain_ready().is_empty());

        thread::sleep(Duration::from_millis(15));

        let reloads = debouncer.drain_ready();
        assert_eq!(reloads.len(), 1);
        assert_eq!(reloads[0].input, WatchedInput::Document);
        assert_eq!(reloads[0].path, PathBuf::from("cv.md"));

        // Drained inputs stay drained.
        assert!(debouncer.drain_ready().is_empty());
    }

    #[test]
    fn test_save_burst_collapses_to_one_reload() {
        // truncate + write + rename from a single editor save
        let debouncer = ReloadDebouncer::new(Duration::from_millis(10));
        debouncer.record(WatchedInput::Document, PathBuf::from("cv.md"));
        debouncer.record(WatchedInput::Document, PathBuf::from("cv.md"));
        debouncer.record(WatchedInput::Document, PathBuf::from("cv.md"));

        thread::sleep(Duration::from_millis(15));

        assert_eq!(debouncer.drain_ready().len(), 1);
    }

    #[test]
    fn test_inputs_reload_independently() {
        let debouncer = ReloadDebouncer::new(Duration::from_millis(10));
        debouncer.record(WatchedInput::Document, PathBuf::from("cv.md"));
        debouncer.record(WatchedInput::Stylesheet, PathBuf::from("dist/output.css"));

        thread::sleep(Duration::from_millis(15));

        let mut inputs: Vec<_> = debouncer
            .drain_ready()
            .into_iter()
            .map(|reload| reload.input)
            .collect();
        inputs.sort_by_key(|input| input.as_str());
        assert_eq!(inputs, vec![WatchedInput::Document, WatchedInput::Stylesheet]);
    }

    #[test]
    fn test_latest_path_wins() {
        let debouncer = ReloadDebouncer::new(Duration::from_millis(10));
        debouncer.record(WatchedInput::Document, PathBuf::from("cv.md"));
        debouncer.record(WatchedInput::Document, PathBuf::from("cv.md.tmp"));

        thread::sleep(Duration::from_millis(15));

        let reloads = debouncer.drain_ready();
        assert_eq!(reloads.len(), 1);
        assert_eq!(reloads[0].path, PathBuf::from("cv.md.tmp"));
    }

    #[test]
    fn test_new_event_extends_deadline() {
        let debouncer = ReloadDebouncer::new(Duration::from_millis(20));
        debouncer.record(WatchedInput::Document, PathBuf::from("cv.md"));

        thread::sleep(Duration::from_millis(12));
        debouncer.record(WatchedInput::Document, PathBuf::from("cv.md"));
        thread::sleep(Duration::from_millis(12));

        // 24ms after the first event but only 12ms after the second.
        assert!(debouncer.drain_ready().is_empty());
    }
}
