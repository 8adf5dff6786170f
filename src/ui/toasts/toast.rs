// SPDX-License-Identifier: MPL-2.0
//! Core toast data structures.
//!
//! A [`Definition`] describes what a toast looks like; an [`Entry`] pairs a
//! definition with its visibility state inside the registry.

use crate::ui::design_tokens::palette;
use iced::Color;
use std::time::Instant;

/// Severity level determines the accent color of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    /// Returns the accent color for this severity level.
    #[must_use]
    pub fn color(&self) -> Color {
        match self {
            Severity::Info => palette::INFO_500,
            Severity::Success => palette::SUCCESS_500,
            Severity::Warning => palette::WARNING_500,
            Severity::Error => palette::ERROR_500,
        }
    }

    /// Returns the glyph shown next to the toast title.
    #[must_use]
    pub fn glyph(&self) -> &'static str {
        match self {
            Severity::Info => "\u{2139}",
            Severity::Success => "\u{2713}",
            Severity::Warning => "\u{26A0}",
            Severity::Error => "\u{2715}",
        }
    }
}

/// Display fields for a toast. Once registered under an id these are
/// immutable: re-registration and triggering never overwrite them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Definition {
    pub title: Option<String>,
    pub description: Option<String>,
    pub severity: Severity,
}

impl Definition {
    pub fn new(severity: Severity) -> Self {
        Self {
            title: None,
            description: None,
            severity,
        }
    }

    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(Severity::Info)
            .with_title(title)
            .with_description(description)
    }

    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(Severity::Success)
            .with_title(title)
            .with_description(description)
    }

    pub fn warning(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(Severity::Warning)
            .with_title(title)
            .with_description(description)
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(Severity::Error)
            .with_title(title)
            .with_description(description)
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A registered toast and its visibility state.
///
/// `generation` counts Closed-to-Open transitions and scopes auto-close
/// timers to a single open cycle: a timer scheduled during generation N is
/// ignored if the entry has since moved on.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    definition: Definition,
    open: bool,
    generation: u64,
    opened_at: Option<Instant>,
}

impl Entry {
    pub(super) fn new(definition: Definition) -> Self {
        Self {
            definition,
            open: false,
            generation: 0,
            opened_at: None,
        }
    }

    #[must_use]
    pub fn definition(&self) -> &Definition {
        &self.definition
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// When the current open cycle started. `None` while closed.
    #[must_use]
    pub fn opened_at(&self) -> Option<Instant> {
        self.opened_at
    }

    /// Flips the open flag. Returns `false` when the write is a no-op
    /// (already in the requested state), so callers can avoid signaling
    /// observers for writes that change nothing.
    pub(super) fn set_open(&mut self, open: bool, now: Instant) -> bool {
        if self.open == open {
            return false;
        }
        self.open = open;
        if open {
            self.generation += 1;
            self.opened_at = Some(now);
        } else {
            self.opened_at = None;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_colors_are_distinct() {
        let info = Severity::Info.color();
        let success = Severity::Success.color();
        let warning = Severity::Warning.color();
        let error = Severity::Error.color();

        assert_ne!(info, success);
        assert_ne!(info, warning);
        assert_ne!(info, error);
        assert_ne!(success, warning);
        assert_ne!(success, error);
        assert_ne!(warning, error);
    }

    #[test]
    fn definition_builder_sets_fields() {
        let definition = Definition::error("Trade failed", "An error occurred during the trade");

        assert_eq!(definition.severity, Severity::Error);
        assert_eq!(definition.title.as_deref(), Some("Trade failed"));
        assert_eq!(
            definition.description.as_deref(),
            Some("An error occurred during the trade")
        );
    }

    #[test]
    fn default_severity_is_info() {
        assert_eq!(Severity::default(), Severity::Info);
        assert_eq!(Definition::default().severity, Severity::Info);
    }

    #[test]
    fn entry_open_bumps_generation_once_per_cycle() {
        let mut entry = Entry::new(Definition::default());
        let now = Instant::now();

        assert!(entry.set_open(true, now));
        assert_eq!(entry.generation(), 1);

        // Opening an already-open entry changes nothing.
        assert!(!entry.set_open(true, now));
        assert_eq!(entry.generation(), 1);

        assert!(entry.set_open(false, now));
        assert!(entry.set_open(true, now));
        assert_eq!(entry.generation(), 2);
    }

    #[test]
    fn closing_clears_opened_at() {
        let mut entry = Entry::new(Definition::default());
        let now = Instant::now();

        entry.set_open(true, now);
        assert_eq!(entry.opened_at(), Some(now));

        entry.set_open(false, now);
        assert!(entry.opened_at().is_none());
    }
}
