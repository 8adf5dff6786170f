// SPDX-License-Identifier: MPL-2.0
//! REST client for the survivor directory backend.
//!
//! The backend exposes survivors, items, trading, and infection reporting
//! over HTTP with JSON bodies. This module only decides *whether* an
//! operation succeeded; which toast to show for a failure is decided by
//! the update loop at the call site.
//!
//! # Components
//!
//! - [`types`] - Wire types shared with the backend
//! - [`client`] - Async HTTP client built on `reqwest`

pub mod client;
pub mod types;

pub use client::Client;
pub use types::{
    Gender, InfectionReport, Inventory, Item, LatLon, NewSurvivor, Survivor, TradeRequest,
    TradeSide,
};
