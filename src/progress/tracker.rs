//! Module view tracking on top of a key-value store

use std::collections::HashMap;

use serde_json::Value;

use super::{
    COMPLETION_MESSAGE, Completion, DEFAULT_RESUME_AFTER_MS, ModuleProgress, ProgressError,
    RecordOutcome, ResumePrompt,
};
use crate::notify::{NoticeKind, Notifier, TracingNotifier};
use crate::percent_of;
use crate::store::{KeyValueStore, LAST_VISIT_KEY, PROGRESS_KEY, StoreError};

/// Tracks first views of an ordered set of modules
///
/// Every read-modify-write goes straight through to the store. Two trackers
/// sharing one store (say, two open windows) can overwrite each other's
/// records; nothing here guards against that.
pub struct ProgressTracker<S: KeyValueStore> {
    /// Backing store
    store: S,

    /// Module ids in page order
    modules: Vec<String>,

    /// First-view records, including ones for modules no longer configured
    progress: HashMap<String, ModuleProgress>,

    /// Minimum gap between visits before offering to resume
    resume_after_ms: i64,

    /// Sink for the completion announcement
    notifier: Box<dyn Notifier>,

    /// Completion has already been announced (or was true at load)
    celebrated: bool,
}

impl<S: KeyValueStore> ProgressTracker<S> {
    /// Load saved progress for `modules` from `store`
    ///
    /// Missing or malformed progress data starts the tracker empty.
    pub fn load<I, M>(store: S, modules: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        let mut ordered: Vec<String> = Vec::new();
        for module in modules {
            let module = module.into();
            if !ordered.contains(&module) {
                ordered.push(module);
            }
        }

        let progress = Self::read_progress(&store);
        let mut tracker = Self {
            store,
            modules: ordered,
            progress,
            resume_after_ms: DEFAULT_RESUME_AFTER_MS,
            notifier: Box::new(TracingNotifier),
            celebrated: false,
        };
        tracker.celebrated = tracker.is_complete();
        tracker
    }

    /// Use a different resume threshold
    pub fn with_resume_after(mut self, millis: i64) -> Self {
        self.resume_after_ms = millis;
        self
    }

    /// Send announcements to `notifier`
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    fn read_progress(store: &S) -> HashMap<String, ModuleProgress> {
        let Some(value) = store.get(PROGRESS_KEY) else {
            return HashMap::new();
        };

        match serde_json::from_value(value) {
            Ok(progress) => progress,
            Err(e) => {
                tracing::warn!("Ignoring malformed progress data: {}", e);
                HashMap::new()
            }
        }
    }

    fn write_progress(&mut self) -> Result<(), StoreError> {
        let value = serde_json::to_value(&self.progress)?;
        self.store.set(PROGRESS_KEY, value)
    }

    /// Module ids in page order
    pub fn module_ids(&self) -> &[String] {
        &self.modules
    }

    /// Whether `module` has been viewed
    pub fn viewed(&self, module: &str) -> bool {
        self.progress.contains_key(module)
    }

    /// First-view record for `module`
    pub fn record(&self, module: &str) -> Option<&ModuleProgress> {
        self.progress.get(module)
    }

    /// Backing store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Note that `module` became visible at `now`
    ///
    /// Only the first view of a module is recorded; later calls are no-ops
    /// and report `created: false`.
    pub fn record_view(&mut self, module: &str, now: i64) -> Result<RecordOutcome, ProgressError> {
        if !self.modules.iter().any(|m| m == module) {
            return Err(ProgressError::UnknownModule(module.to_string()));
        }
        if self.progress.contains_key(module) {
            return Ok(RecordOutcome::default());
        }

        self.progress.insert(module.to_string(), ModuleProgress::first_viewed(now));
        if let Err(e) = self.write_progress() {
            self.progress.remove(module);
            return Err(e.into());
        }
        tracing::debug!(module, timestamp = now, "module viewed");

        let completed = self.check_completion();
        Ok(RecordOutcome { created: true, completed })
    }

    /// Viewed count and percentage over the configured modules
    pub fn completion(&self) -> Completion {
        let total = self.modules.len();
        let viewed = self.modules.iter().filter(|m| self.progress.contains_key(*m)).count();
        Completion { viewed, total, percentage: percent_of(viewed as u64, total as u64) }
    }

    /// Whether every configured module has been viewed
    pub fn is_complete(&self) -> bool {
        let completion = self.completion();
        completion.viewed == completion.total
    }

    /// Announce completion if it has just been reached
    ///
    /// Returns true only on the call that observes the incomplete to complete
    /// transition; the announcement never repeats for this tracker.
    pub fn check_completion(&mut self) -> bool {
        if self.celebrated || !self.is_complete() {
            return false;
        }

        self.celebrated = true;
        tracing::info!(modules = self.modules.len(), "all modules viewed");
        self.notifier.notify(COMPLETION_MESSAGE, NoticeKind::Success);
        true
    }

    /// First module in page order without a record
    pub fn next_unviewed(&self) -> Option<&str> {
        self.modules.iter().find(|m| !self.progress.contains_key(*m)).map(String::as_str)
    }

    /// Viewed module with the latest timestamp; ties go to the earlier module
    pub fn most_recently_viewed(&self) -> Option<&str> {
        let mut latest: Option<(&str, i64)> = None;
        for module in &self.modules {
            if let Some(record) = self.progress.get(module) {
                if latest.is_none_or(|(_, ts)| record.timestamp > ts) {
                    latest = Some((module.as_str(), record.timestamp));
                }
            }
        }
        latest.map(|(module, _)| module)
    }

    /// Timestamp of the previous visit, if one was recorded
    pub fn last_visit(&self) -> Option<i64> {
        let value = self.store.get(LAST_VISIT_KEY)?;
        let parsed = match &value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        };
        if parsed.is_none() {
            tracing::warn!("Ignoring malformed last visit: {}", value);
        }
        parsed
    }

    /// Decide whether to offer resuming
    ///
    /// Requires a previous visit more than the resume threshold ago and
    /// progress that is neither empty nor complete.
    pub fn should_prompt_resume(&self, last_visit: Option<i64>, now: i64) -> Option<ResumePrompt> {
        let last_visit = last_visit?;
        if now.saturating_sub(last_visit) <= self.resume_after_ms {
            return None;
        }

        let completion = self.completion();
        if completion.viewed == 0 || completion.viewed >= completion.total {
            return None;
        }

        let next_module = self.next_unviewed()?.to_string();
        let last_viewed = self.most_recently_viewed().map(str::to_string);
        tracing::info!(next = %next_module, "offering to resume");
        Some(ResumePrompt { next_module, last_viewed })
    }

    /// Overwrite the stored last-visit timestamp
    pub fn record_visit(&mut self, now: i64) -> Result<(), ProgressError> {
        self.store.set(LAST_VISIT_KEY, Value::from(now))?;
        Ok(())
    }

    /// Page-load sequence: check the previous visit, then record this one
    pub fn begin_visit(&mut self, now: i64) -> Result<Option<ResumePrompt>, ProgressError> {
        let prompt = self.should_prompt_resume(self.last_visit(), now);
        self.record_visit(now)?;
        Ok(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::testing::RecordingNotifier;
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const HOUR: i64 = 3_600_000;

    fn tracker(modules: &[&str]) -> ProgressTracker<MemoryStore> {
        ProgressTracker::load(MemoryStore::new(), modules.iter().copied())
    }

    #[test]
    fn first_view_wins() {
        let mut tracker = tracker(&["a", "b"]);

        let first = tracker.record_view("a", 100).unwrap();
        assert!(first.created);
        let second = tracker.record_view("a", 200).unwrap();
        assert!(!second.created);

        assert_eq!(tracker.record("a"), Some(&ModuleProgress::first_viewed(100)));
        let stored = tracker.store().get(PROGRESS_KEY).unwrap();
        assert_eq!(stored, json!({"a": {"viewed": true, "timestamp": 100}}));
    }

    #[test]
    fn repeated_views_match_a_single_view() {
        let mut once = tracker(&["a", "b"]);
        once.record_view("a", 7).unwrap();

        let mut many = tracker(&["a", "b"]);
        for t in 7..12 {
            many.record_view("a", t).unwrap();
        }

        assert_eq!(once.store().get(PROGRESS_KEY), many.store().get(PROGRESS_KEY));
    }

    #[test]
    fn unknown_module_is_rejected() {
        let mut tracker = tracker(&["a"]);
        let err = tracker.record_view("zzz", 1).unwrap_err();
        assert!(matches!(err, ProgressError::UnknownModule(ref m) if m == "zzz"));
        assert!(tracker.store().get(PROGRESS_KEY).is_none());
    }

    #[test]
    fn completion_rounds_percentage() {
        let mut tracker = tracker(&["a", "b", "c"]);
        assert_eq!(tracker.completion(), Completion { viewed: 0, total: 3, percentage: 0 });

        tracker.record_view("a", 1).unwrap();
        assert_eq!(tracker.completion().percentage, 33);
        tracker.record_view("b", 2).unwrap();
        assert_eq!(tracker.completion().percentage, 67);
        tracker.record_view("c", 3).unwrap();
        assert_eq!(tracker.completion(), Completion { viewed: 3, total: 3, percentage: 100 });
    }

    #[test]
    fn no_modules_means_zero_percent() {
        let tracker = tracker(&[]);
        assert_eq!(tracker.completion().percentage, 0);
    }

    #[test]
    fn completion_is_announced_exactly_once() {
        let notifier = RecordingNotifier::default();
        let mut tracker = tracker(&["a", "b"]).with_notifier(notifier.clone());

        assert!(!tracker.record_view("a", 1).unwrap().completed);
        assert!(!tracker.is_complete());

        let outcome = tracker.record_view("b", 2).unwrap();
        assert!(outcome.completed);
        assert!(tracker.is_complete());
        assert_eq!(notifier.count(), 1);
        assert_eq!(
            notifier.notices.borrow()[0],
            (COMPLETION_MESSAGE.to_string(), NoticeKind::Success)
        );

        assert!(!tracker.check_completion());
        assert!(!tracker.record_view("b", 3).unwrap().completed);
        assert_eq!(notifier.count(), 1);
    }

    #[test]
    fn already_complete_progress_is_not_announced_on_load() {
        let store = MemoryStore::with_entry(
            PROGRESS_KEY,
            json!({"a": {"viewed": true, "timestamp": 1}}),
        );
        let notifier = RecordingNotifier::default();
        let mut tracker = ProgressTracker::load(store, ["a"]).with_notifier(notifier.clone());

        assert!(tracker.is_complete());
        assert!(!tracker.check_completion());
        assert_eq!(notifier.count(), 0);
    }

    #[test]
    fn malformed_progress_is_treated_as_empty() {
        let store = MemoryStore::with_entry(PROGRESS_KEY, json!("garbage"));
        let mut tracker = ProgressTracker::load(store, ["a", "b"]);

        assert_eq!(tracker.completion().viewed, 0);
        assert!(tracker.record_view("a", 5).unwrap().created);
    }

    #[test]
    fn stale_modules_are_kept_but_not_counted() {
        let store = MemoryStore::with_entry(
            PROGRESS_KEY,
            json!({
                "retired": {"viewed": true, "timestamp": 1},
                "a": {"viewed": true, "timestamp": 2}
            }),
        );
        let mut tracker = ProgressTracker::load(store, ["a", "b"]);
        assert_eq!(tracker.completion().viewed, 1);

        tracker.record_view("b", 3).unwrap();
        let stored = tracker.store().get(PROGRESS_KEY).unwrap();
        assert!(stored.get("retired").is_some());
    }

    #[test]
    fn resume_prompt_after_an_hour() {
        let mut tracker = tracker(&["a", "b", "c"]);
        tracker.record_view("a", 10).unwrap();

        let prompt = tracker.should_prompt_resume(Some(0), HOUR + 1).unwrap();
        assert_eq!(
            prompt,
            ResumePrompt { next_module: "b".to_string(), last_viewed: Some("a".to_string()) }
        );
    }

    #[test]
    fn no_resume_prompt_within_an_hour() {
        let mut tracker = tracker(&["a", "b", "c"]);
        tracker.record_view("a", 10).unwrap();

        assert!(tracker.should_prompt_resume(Some(0), HOUR).is_none());
        assert!(tracker.should_prompt_resume(None, HOUR * 5).is_none());
    }

    #[test]
    fn no_resume_prompt_without_partial_progress() {
        let mut tracker = tracker(&["a", "b"]);
        assert!(tracker.should_prompt_resume(Some(0), HOUR * 2).is_none());

        tracker.record_view("a", 1).unwrap();
        tracker.record_view("b", 2).unwrap();
        assert!(tracker.should_prompt_resume(Some(0), HOUR * 2).is_none());
    }

    #[test]
    fn resume_points_at_latest_view_and_first_gap() {
        let mut tracker = tracker(&["a", "b", "c", "d"]);
        tracker.record_view("c", 50).unwrap();
        tracker.record_view("a", 90).unwrap();

        let prompt = tracker.should_prompt_resume(Some(0), HOUR * 2).unwrap();
        assert_eq!(prompt.next_module, "b");
        assert_eq!(prompt.last_viewed.as_deref(), Some("a"));
    }

    #[test]
    fn equal_timestamps_favour_page_order() {
        let mut tracker = tracker(&["a", "b", "c"]);
        tracker.record_view("b", 5).unwrap();
        tracker.record_view("a", 5).unwrap();
        assert_eq!(tracker.most_recently_viewed(), Some("a"));
    }

    #[test]
    fn custom_resume_threshold() {
        let mut tracker = tracker(&["a", "b"]).with_resume_after(1_000);
        tracker.record_view("a", 1).unwrap();
        assert!(tracker.should_prompt_resume(Some(0), 1_001).is_some());
    }

    #[test]
    fn begin_visit_consults_previous_timestamp() {
        let mut tracker = tracker(&["a", "b"]);
        tracker.record_view("a", 1).unwrap();

        assert!(tracker.begin_visit(1_000).unwrap().is_none());
        assert_eq!(tracker.last_visit(), Some(1_000));

        let prompt = tracker.begin_visit(1_000 + HOUR + 1).unwrap();
        assert_eq!(prompt.map(|p| p.next_module), Some("b".to_string()));
        assert_eq!(tracker.last_visit(), Some(1_000 + HOUR + 1));
    }

    #[test]
    fn last_visit_accepts_legacy_string() {
        let store = MemoryStore::with_entry(LAST_VISIT_KEY, json!("1700000000000"));
        let tracker = ProgressTracker::load(store, ["a"]);
        assert_eq!(tracker.last_visit(), Some(1_700_000_000_000));
    }

    /// Store whose writes always fail
    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Option<Value> {
            None
        }

        fn set(&mut self, _key: &str, _value: Value) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk full")))
        }
    }

    #[test]
    fn failed_write_leaves_module_unviewed() {
        let mut tracker = ProgressTracker::load(FailingStore, ["a", "b"]);

        let result = tracker.record_view("a", 1);
        assert!(matches!(result, Err(ProgressError::Store(StoreError::Io(_)))));
        assert!(!tracker.viewed("a"));
        assert_eq!(tracker.completion().viewed, 0);

        // A retry is treated as a first view again
        assert!(tracker.record_view("a", 2).is_err());
        assert!(!tracker.viewed("a"));
    }

    #[test]
    fn malformed_last_visit_is_absent() {
        let store = MemoryStore::with_entry(LAST_VISIT_KEY, json!({"when": "yesterday"}));
        let tracker = ProgressTracker::load(store, ["a"]);
        assert_eq!(tracker.last_visit(), None);
    }

    #[test]
    fn duplicate_module_ids_are_collapsed() {
        let tracker = tracker(&["a", "b", "a"]);
        assert_eq!(tracker.module_ids(), ["a".to_string(), "b".to_string()]);
    }
}
