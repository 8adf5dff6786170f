// SPDX-License-Identifier: MPL-2.0
//! Toast registry: the single source of truth for toast definitions and
//! their open state.
//!
//! The registry is owned by the `App` struct and handed to collaborators
//! explicitly; there is no global static. All mutation happens
//! synchronously on the UI event loop, so operations issued in the same
//! tick resolve deterministically in call order (last write wins).
//!
//! Every operation here is total: duplicate registration, triggering an
//! unknown id, and closing an already-closed toast are all defined no-ops.

use super::toast::{Definition, Entry};
use iced::Task;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Messages produced by the rendering layer and by auto-close timers.
#[derive(Debug, Clone)]
pub enum Message {
    /// User clicked the dismiss button of an open toast.
    Dismiss(String),
    /// An auto-close timer fired. Carries the generation it was scheduled
    /// in so a timer from a previous open cycle is ignored.
    AutoClose { id: String, generation: u64 },
}

/// Map of toast ids to their definition and open state.
///
/// `version` changes exactly when observable state changes; a call that
/// mutates nothing (re-registering existing ids, closing a closed toast)
/// leaves it untouched, so observers can skip re-deriving projections.
#[derive(Debug, Default)]
pub struct Registry {
    entries: BTreeMap<String, Entry>,
    version: u64,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `definition` under `id` if the id is absent.
    ///
    /// Re-registering an existing id is a defined no-op: the original
    /// definition is kept, guarding against double-registration when
    /// several screens declare the same toast.
    pub fn register(&mut self, id: impl Into<String>, definition: Definition) {
        let id = id.into();
        if self.entries.contains_key(&id) {
            return;
        }
        self.entries.insert(id, Entry::new(definition));
        self.version += 1;
    }

    /// Applies [`register`](Self::register) semantics per entry.
    ///
    /// When every id is already present this performs no state mutation at
    /// all, not even a version bump, so a catalog re-declaration does not
    /// signal observers.
    pub fn bulk_register<I>(&mut self, definitions: I)
    where
        I: IntoIterator<Item = (String, Definition)>,
    {
        let mut changed = false;
        for (id, definition) in definitions {
            if self.entries.contains_key(&id) {
                continue;
            }
            self.entries.insert(id, Entry::new(definition));
            changed = true;
        }
        if changed {
            self.version += 1;
        }
    }

    /// Opens the toast registered under `id`.
    ///
    /// Returns `true` when this call transitioned the entry from closed to
    /// open (the caller should then schedule an auto-close task). Unknown
    /// ids and already-open entries return `false`.
    pub fn open(&mut self, id: &str) -> bool {
        self.set_open(id, true)
    }

    /// Self-registering trigger: registers `definition` first (a no-op if
    /// `id` already exists, preserving the existing display fields), then
    /// opens the toast. Registration and opening are atomic from the
    /// caller's point of view.
    pub fn open_with(&mut self, id: impl Into<String>, definition: Definition) -> bool {
        let id = id.into();
        self.register(id.clone(), definition);
        self.open(&id)
    }

    /// Last-write-wins setter for the open flag, used by the overlay for
    /// dismissal and by auto-close timers. Unknown ids are a silent no-op.
    ///
    /// Returns `true` when the entry actually changed state.
    pub fn set_open(&mut self, id: &str, open: bool) -> bool {
        let Some(entry) = self.entries.get_mut(id) else {
            return false;
        };
        let changed = entry.set_open(open, Instant::now());
        if changed {
            self.version += 1;
        }
        changed
    }

    /// Handles a message from the overlay or an auto-close timer.
    pub fn handle_message(&mut self, message: &Message) {
        match message {
            Message::Dismiss(id) => {
                self.set_open(id, false);
            }
            Message::AutoClose { id, generation } => {
                // Only close the cycle the timer was scheduled for; a stale
                // timer racing a manual close-and-reopen must not clip the
                // newer cycle short.
                if self
                    .get(id)
                    .is_some_and(|e| e.is_open() && e.generation() == *generation)
                {
                    self.set_open(id, false);
                }
            }
        }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.get(id)
    }

    /// All registered entries in stable (lexicographic) order.
    pub fn entries(&self) -> impl Iterator<Item = (&String, &Entry)> {
        self.entries.iter()
    }

    /// Entries currently presented to the user.
    pub fn open_entries(&self) -> impl Iterator<Item = (&String, &Entry)> {
        self.entries.iter().filter(|(_, entry)| entry.is_open())
    }

    #[must_use]
    pub fn any_open(&self) -> bool {
        self.entries.values().any(Entry::is_open)
    }

    /// Observable state version. Changes exactly when a mutating operation
    /// actually changed state.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }
}

/// Deferred auto-close task for one open cycle of `id`.
///
/// The task sleeps for `delay` and then posts [`Message::AutoClose`] with
/// the generation captured at scheduling time. The registry ignores the
/// message if the entry has been closed or reopened since.
pub fn close_after(id: String, generation: u64, delay: Duration) -> Task<Message> {
    Task::perform(tokio::time::sleep(delay), move |()| Message::AutoClose {
        id: id.clone(),
        generation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::toasts::toast::Severity;

    fn definition(title: &str) -> Definition {
        Definition::error(title, "description")
    }

    #[test]
    fn new_registry_is_empty() {
        let registry = Registry::new();
        assert_eq!(registry.entries().count(), 0);
        assert_eq!(registry.version(), 0);
        assert!(!registry.any_open());
    }

    #[test]
    fn registering_twice_retains_the_first_definition() {
        let mut registry = Registry::new();
        registry.register("trade-error", definition("first"));
        registry.register("trade-error", definition("second"));

        let entry = registry.get("trade-error").expect("registered");
        assert_eq!(entry.definition().title.as_deref(), Some("first"));
        assert_eq!(registry.entries().count(), 1);
    }

    #[test]
    fn bulk_register_with_all_present_ids_is_a_version_no_op() {
        let mut registry = Registry::new();
        registry.register("trade-error", definition("a"));
        registry.register("trade-success", definition("b"));
        let version = registry.version();

        registry.bulk_register(vec![
            ("trade-error".to_string(), definition("x")),
            ("trade-success".to_string(), definition("y")),
        ]);

        assert_eq!(registry.version(), version);
        let entry = registry.get("trade-error").expect("registered");
        assert_eq!(entry.definition().title.as_deref(), Some("a"));
    }

    #[test]
    fn bulk_register_adds_only_missing_ids() {
        let mut registry = Registry::new();
        registry.register("report-error", definition("kept"));

        registry.bulk_register(vec![
            ("report-error".to_string(), definition("ignored")),
            ("report-success".to_string(), definition("added")),
        ]);

        assert_eq!(registry.entries().count(), 2);
        assert_eq!(
            registry
                .get("report-error")
                .expect("registered")
                .definition()
                .title
                .as_deref(),
            Some("kept")
        );
        assert_eq!(
            registry
                .get("report-success")
                .expect("registered")
                .definition()
                .title
                .as_deref(),
            Some("added")
        );
    }

    #[test]
    fn open_with_registers_and_opens_unknown_ids() {
        let mut registry = Registry::new();

        let opened = registry.open_with("registration-error", definition("supplied"));

        assert!(opened);
        let entry = registry.get("registration-error").expect("registered");
        assert!(entry.is_open());
        assert_eq!(entry.definition().title.as_deref(), Some("supplied"));
        assert_eq!(entry.definition().severity, Severity::Error);
    }

    #[test]
    fn open_with_preserves_existing_display_fields() {
        let mut registry = Registry::new();
        registry.register("trade-error", definition("original"));

        registry.open_with("trade-error", definition("from-trigger"));

        let entry = registry.get("trade-error").expect("registered");
        assert!(entry.is_open());
        assert_eq!(entry.definition().title.as_deref(), Some("original"));
    }

    #[test]
    fn open_on_unregistered_id_is_a_silent_no_op() {
        let mut registry = Registry::new();
        assert!(!registry.open("never-registered"));
        assert_eq!(registry.version(), 0);
        assert!(registry.get("never-registered").is_none());
    }

    #[test]
    fn same_tick_open_then_close_resolves_to_closed() {
        let mut registry = Registry::new();
        registry.register("report-success", definition("a"));

        registry.set_open("report-success", true);
        registry.set_open("report-success", false);

        assert!(!registry.get("report-success").expect("registered").is_open());
    }

    #[test]
    fn closing_an_already_closed_toast_changes_nothing() {
        let mut registry = Registry::new();
        registry.register("trade-error", definition("a"));
        let version = registry.version();

        assert!(!registry.set_open("trade-error", false));
        assert_eq!(registry.version(), version);
    }

    #[test]
    fn stale_auto_close_does_not_affect_a_later_open_cycle() {
        let mut registry = Registry::new();
        registry.register("trade-error", definition("a"));

        // First cycle: open, capture the generation a timer would hold.
        registry.open("trade-error");
        let stale_generation = registry.get("trade-error").expect("registered").generation();

        // Close manually, then reopen (a new cycle).
        registry.set_open("trade-error", false);
        registry.open("trade-error");

        // The first cycle's timer fires late.
        registry.handle_message(&Message::AutoClose {
            id: "trade-error".to_string(),
            generation: stale_generation,
        });

        assert!(
            registry.get("trade-error").expect("registered").is_open(),
            "a stale timer must not close the reopened cycle"
        );
    }

    #[test]
    fn current_generation_auto_close_closes_the_toast() {
        let mut registry = Registry::new();
        registry.register("trade-error", definition("a"));
        registry.open("trade-error");
        let generation = registry.get("trade-error").expect("registered").generation();

        registry.handle_message(&Message::AutoClose {
            id: "trade-error".to_string(),
            generation,
        });

        assert!(!registry.get("trade-error").expect("registered").is_open());
    }

    #[test]
    fn timer_and_dismiss_racing_are_idempotent() {
        let mut registry = Registry::new();
        registry.register("report-error", definition("a"));
        registry.open("report-error");
        let generation = registry.get("report-error").expect("registered").generation();

        registry.handle_message(&Message::Dismiss("report-error".to_string()));
        let version = registry.version();

        // The timer for the same cycle fires after the manual dismiss.
        registry.handle_message(&Message::AutoClose {
            id: "report-error".to_string(),
            generation,
        });

        assert!(!registry.get("report-error").expect("registered").is_open());
        assert_eq!(registry.version(), version, "second close must not signal");
    }

    #[test]
    fn distinct_ids_opened_in_the_same_tick_are_independent() {
        let mut registry = Registry::new();
        registry.register("trade-error", definition("trade"));
        registry.register("report-error", definition("report"));

        registry.open("trade-error");
        registry.open("report-error");
        registry.set_open("trade-error", false);

        assert!(!registry.get("trade-error").expect("registered").is_open());
        assert!(registry.get("report-error").expect("registered").is_open());
        assert_eq!(
            registry
                .get("report-error")
                .expect("registered")
                .definition()
                .title
                .as_deref(),
            Some("report")
        );
    }

    #[test]
    fn reopening_after_close_allows_indefinite_cycles() {
        let mut registry = Registry::new();
        registry.register("location-update-success", definition("a"));

        for expected_generation in 1..=5 {
            assert!(registry.open("location-update-success"));
            assert_eq!(
                registry
                    .get("location-update-success")
                    .expect("registered")
                    .generation(),
                expected_generation
            );
            registry.set_open("location-update-success", false);
        }
    }

    #[test]
    fn open_entries_reports_only_open_toasts() {
        let mut registry = Registry::new();
        registry.register("a-toast", definition("a"));
        registry.register("b-toast", definition("b"));
        registry.open("b-toast");

        let open: Vec<&String> = registry.open_entries().map(|(id, _)| id).collect();
        assert_eq!(open, vec!["b-toast"]);
        assert!(registry.any_open());
    }
}
