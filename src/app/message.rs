// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::api::types::Item;
use crate::error::Error;
use crate::ui::directory;
use crate::ui::navbar;
use crate::ui::profile;
use crate::ui::register;
use crate::ui::toasts;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Directory(directory::Message),
    Profile(profile::Message),
    Register(register::Message),
    Navbar(navbar::Message),
    Toast(toasts::Message),
    /// The shared item catalog finished loading.
    ItemsLoaded(Result<Vec<Item>, Error>),
    /// Periodic tick that refreshes toast countdown bars.
    Tick(Instant),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional backend base URL override.
    pub api_url: Option<String>,
    /// Optional directory containing Fluent `.ftl` files for custom builds.
    pub i18n_dir: Option<String>,
    /// Optional data directory override (for the identity file).
    /// Takes precedence over `ICED_OUTPOST_DATA_DIR` environment variable.
    pub data_dir: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `ICED_OUTPOST_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
}
