// SPDX-License-Identifier: MPL-2.0
//! Toast notification system for user feedback.
//!
//! Toasts are keyed by a stable string id (e.g. `trade-error`). Any part
//! of the application may register a definition for an id; registration is
//! idempotent, so independent screens can declare overlapping catalogs
//! without clobbering each other. Triggering an id flips its open flag,
//! and the overlay projects every open entry to a card with a countdown
//! bar that requests closure when the display duration elapses.
//!
//! # Components
//!
//! - [`toast`] - `Definition`, `Severity`, and the per-id `Entry` record
//! - [`registry`] - `Registry`: the single source of truth for all toast
//!   state, plus the generation-scoped auto-close task
//! - [`overlay`] - widget projecting open entries to visual elements
//!
//! # Usage
//!
//! ```ignore
//! use crate::ui::toasts::{Definition, Registry, Severity};
//!
//! let mut toasts = Registry::new();
//! toasts.register("trade-error", Definition::error("Trade failed", "The trade was rejected"));
//! toasts.open("trade-error");
//! ```

pub mod overlay;
pub mod registry;
pub mod toast;

pub use overlay::Overlay;
pub use registry::{close_after, Message, Registry};
pub use toast::{Definition, Entry, Severity};
