// SPDX-License-Identifier: MPL-2.0
//! `iced_outpost` is a desktop client for a survivor directory service,
//! built with the Iced GUI framework.
//!
//! It browses registered survivors, manages a local identity, and supports
//! location updates, infection reporting, and worth-balanced item trades
//! against a REST backend. User feedback goes through a toast registry
//! with generation-scoped auto-close timers. Internationalization uses
//! Fluent, and preferences persist as TOML.

#![doc(html_root_url = "https://docs.rs/iced_outpost/0.1.0")]

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod i18n;
pub mod ui;
