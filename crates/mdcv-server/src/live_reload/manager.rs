//! Live reload manager.
//!
//! Coordinates file watching and WebSocket broadcasting for live reload.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::Serialize;
use tokio::sync::broadcast;
use tokio::sync::mpsc;

use super::debouncer::{PendingReload, ReloadDebouncer, WatchedInput};

/// Event sent to connected WebSocket clients when files change.
#[derive(Clone, Debug, Serialize)]
pub(crate) struct ReloadEvent {
    /// Event type (always "reload").
    #[serde(rename = "type")]
    event_type: &'static str,
    /// Which input changed: "document", "stylesheet", or "any" when a
    /// client fell behind and must resync.
    input: &'static str,
    /// Changed file, relative to its watch root.
    path: String,
}

impl ReloadEvent {
    fn new(input: WatchedInput, path: String) -> Self {
        Self {
            event_type: "reload",
            input: input.as_str(),
            path,
        }
    }

    /// Catch-all reload for a client that missed events.
    pub(crate) fn resync() -> Self {
        Self {
            event_type: "reload",
            input: "any",
            path: String::new(),
        }
    }
}

/// Default quiet period in milliseconds.
const DEFAULT_DEBOUNCE_MS: u64 = 100;

/// Default watch patterns: the CV source and the compiled stylesheet.
const DEFAULT_WATCH_PATTERNS: &[&str] = &["**/*.md", "**/*.css"];

/// Directories to watch for a given source file and stylesheet output.
///
/// Watches the parent directory of each path. Duplicates collapse so a
/// project keeping both in one directory gets a single watcher root.
#[must_use]
pub(crate) fn watch_roots(source: &Path, css_output: &Path) -> Vec<PathBuf> {
    let mut roots = Vec::new();
    for path in [source, css_output] {
        if let Some(parent) = path.parent() {
            let parent = parent.to_path_buf();
            if !roots.contains(&parent) {
                roots.push(parent);
            }
        }
    }
    roots
}

/// Manages file watching and broadcasting reload events.
pub(crate) struct LiveReloadManager {
    watch_roots: Vec<PathBuf>,
    watch_patterns: Vec<String>,
    broadcaster: broadcast::Sender<ReloadEvent>,
    watcher: Option<RecommendedWatcher>,
    debounce_ms: u64,
}

impl LiveReloadManager {
    /// Create a new live reload manager.
    #[must_use]
    pub(crate) fn new(
        watch_roots: Vec<PathBuf>,
        watch_patterns: Option<Vec<String>>,
        broadcaster: broadcast::Sender<ReloadEvent>,
    ) -> Self {
        Self {
            watch_roots,
            watch_patterns: watch_patterns.unwrap_or_else(|| {
                DEFAULT_WATCH_PATTERNS
                    .iter()
                    .map(ToString::to_string)
                    .collect()
            }),
            broadcaster,
            watcher: None,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }

    /// Set the quiet period in milliseconds.
    #[allow(dead_code)]
    #[must_use]
    pub(crate) fn with_debounce_ms(mut self, debounce_ms: u64) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    /// Start the file watcher.
    ///
    /// Spawns a background task that watches for file changes and broadcasts
    /// reload events to connected WebSocket clients.
    ///
    /// # Errors
    ///
    /// Returns an error if the file watcher cannot be created.
    pub(crate) fn start(&mut self) -> Result<(), notify::Error> {
        let (tx, mut rx) = mpsc::channel::<Event>(100);

        // Create watcher with callback that sends events to channel
        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res {
                // Use blocking_send since callback is sync
                let _ = tx.blocking_send(event);
            }
        })?;

        for root in &self.watch_roots {
            if !root.exists() {
                tracing::warn!(root = %root.display(), "Watch root does not exist, skipping");
                continue;
            }
            watcher.watch(root, RecursiveMode::Recursive)?;
        }
        self.watcher = Some(watcher);

        // Create debouncer
        let debouncer = Arc::new(ReloadDebouncer::new(Duration::from_millis(
            self.debounce_ms,
        )));
        let debouncer_for_record = Arc::clone(&debouncer);

        // Spawn task to record events into debouncer
        let watch_patterns = self.watch_patterns.clone();
        let roots_for_record = self.watch_roots.clone();

        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                Self::record_event(&event, &roots_for_record, &watch_patterns, &debouncer_for_record);
            }
        });

        // Spawn task to process debounced reloads
        let broadcaster = self.broadcaster.clone();
        let roots_for_process = self.watch_roots.clone();
        let poll_interval = Duration::from_millis(50);

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(poll_interval);

            loop {
                interval.tick().await;

                for reload in debouncer.drain_ready() {
                    Self::handle_reload(&reload, &roots_for_process, &broadcaster);
                }
            }
        });

        Ok(())
    }

    /// Record a raw filesystem event into the debouncer.
    fn record_event(
        event: &Event,
        roots: &[PathBuf],
        watch_patterns: &[String],
        debouncer: &ReloadDebouncer,
    ) {
        // Only content-affecting events; access/metadata noise is ignored.
        if !matches!(
            event.kind,
            EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
        ) {
            return;
        }

        for path in &event.paths {
            if !Self::matches_patterns(path, roots, watch_patterns) {
                continue;
            }

            let input = WatchedInput::classify(path);
            debouncer.record(input, path.clone());
            tracing::debug!(
                path = %path.display(),
                input = input.as_str(),
                "Recorded filesystem event"
            );
        }
    }

    /// Broadcast a debounced reload.
    ///
    /// Any surviving change triggers a full page reload; the browser
    /// re-fetches both the document and the embedded stylesheet.
    fn handle_reload(
        reload: &PendingReload,
        roots: &[PathBuf],
        broadcaster: &broadcast::Sender<ReloadEvent>,
    ) {
        let start = Instant::now();

        let path = Self::relative_display(&reload.path, roots);
        let _ = broadcaster.send(ReloadEvent::new(reload.input, path.clone()));

        tracing::info!(
            path = %path,
            input = reload.input.as_str(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Live reload event processed"
        );
    }

    /// Display the path relative to the first matching watch root.
    fn relative_display(path: &Path, roots: &[PathBuf]) -> String {
        roots
            .iter()
            .find_map(|root| path.strip_prefix(root).ok())
            .unwrap_or(path)
            .display()
            .to_string()
    }

    /// Check if a path matches any watch pattern under any root.
    fn matches_patterns(path: &Path, roots: &[PathBuf], patterns: &[String]) -> bool {
        let Some(relative) = roots.iter().find_map(|root| path.strip_prefix(root).ok()) else {
            return false;
        };

        let relative_str = relative.to_string_lossy();

        patterns
            .iter()
            .filter_map(|p| glob::Pattern::new(p).ok())
            .any(|glob_pattern| glob_pattern.matches(&relative_str))
    }

    /// Get a receiver for reload events.
    #[must_use]
    pub(crate) fn subscribe(&self) -> broadcast::Receiver<ReloadEvent> {
        self.broadcaster.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reload_event_carries_input_and_path() {
        let event = ReloadEvent::new(WatchedInput::Stylesheet, "output.css".to_string());

        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "reload");
        assert_eq!(json["input"], "stylesheet");
        assert_eq!(json["path"], "output.css");
    }

    #[test]
    fn test_resync_event_targets_any_input() {
        let json = serde_json::to_value(ReloadEvent::resync()).unwrap();

        assert_eq!(json["type"], "reload");
        assert_eq!(json["input"], "any");
        assert_eq!(json["path"], "");
    }

    #[test]
    fn test_watch_roots_deduplicates_shared_parent() {
        let roots = watch_roots(
            Path::new("/project/cv.md"),
            Path::new("/project/output.css"),
        );
        assert_eq!(roots, vec![PathBuf::from("/project")]);
    }

    #[test]
    fn test_watch_roots_separate_parents() {
        let roots = watch_roots(
            Path::new("/project/cv.md"),
            Path::new("/project/dist/output.css"),
        );
        assert_eq!(
            roots,
            vec![PathBuf::from("/project"), PathBuf::from("/project/dist")]
        );
    }

    #[test]
    fn test_matches_patterns_markdown_and_css() {
        let roots = vec![PathBuf::from("/project"), PathBuf::from("/project/dist")];
        let patterns = vec!["**/*.md".to_string(), "**/*.css".to_string()];

        assert!(LiveReloadManager::matches_patterns(
            &PathBuf::from("/project/cv.md"),
            &roots,
            &patterns
        ));
        assert!(LiveReloadManager::matches_patterns(
            &PathBuf::from("/project/dist/output.css"),
            &roots,
            &patterns
        ));
        assert!(!LiveReloadManager::matches_patterns(
            &PathBuf::from("/project/notes.txt"),
            &roots,
            &patterns
        ));
    }

    #[test]
    fn test_matches_patterns_outside_roots() {
        let roots = vec![PathBuf::from("/project")];
        let patterns = vec!["**/*.md".to_string()];

        assert!(!LiveReloadManager::matches_patterns(
            &PathBuf::from("/other/cv.md"),
            &roots,
            &patterns
        ));
    }

    #[test]
    fn test_relative_display_strips_root() {
        let roots = vec![PathBuf::from("/project")];
        assert_eq!(
            LiveReloadManager::relative_display(&PathBuf::from("/project/cv.md"), &roots),
            "cv.md"
        );
    }

    #[test]
    fn test_relative_display_outside_roots_keeps_full_path() {
        let roots = vec![PathBuf::from("/project")];
        assert_eq!(
            LiveReloadManager::relative_display(&PathBuf::from("/other/cv.md"), &roots),
            "/other/cv.md"
        );
    }
}
