// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the screens.
//!
//! The `App` struct wires together the domains (directory, profile,
//! registration, localization, toasts) and translates component effects
//! into side effects like API calls or toast triggers. This file keeps
//! policy decisions (identity adoption, toast duration, startup fetches)
//! close to the main update loop so it is easy to audit user-facing
//! behavior.

mod message;
pub mod paths;
pub mod persisted_state;
mod screen;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};
pub use screen::Screen;

use crate::api::client::Client;
use crate::api::types::Item;
use crate::config::{self, Config};
use crate::i18n::fluent::I18n;
use crate::ui::directory;
use crate::ui::profile;
use crate::ui::register;
use crate::ui::toasts::{self, Definition, Entry, Registry};
use iced::{window, Element, Subscription, Task, Theme};
use persisted_state::Identity;
use std::fmt;
use std::time::Duration;

/// Root Iced application state that bridges the screens, localization, and
/// the toast registry.
pub struct App {
    pub i18n: I18n,
    screen: Screen,
    directory: directory::State,
    /// Present while a profile screen is open; dropped on navigation back.
    profile: Option<profile::State>,
    register: register::State,
    /// Shared item catalog, fetched once at startup.
    items: Vec<Item>,
    toasts: Registry,
    toast_duration: Duration,
    identity: Identity,
    api: Client,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.screen)
            .field("identified", &self.identity.is_identified())
            .finish()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 680;
pub const WINDOW_DEFAULT_WIDTH: u32 = 960;
pub const MIN_WINDOW_HEIGHT: u32 = 500;
pub const MIN_WINDOW_WIDTH: u32 = 650;

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Initializes application state and kicks off the startup fetches for
    /// the survivor list and the item catalog.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        paths::init_cli_overrides(flags.data_dir.clone(), flags.config_dir.clone());

        let config = load_config();
        let i18n = I18n::new(flags.lang.clone(), flags.i18n_dir.clone(), &config);

        let api_url = flags
            .api_url
            .clone()
            .or_else(|| config.api_base_url.clone())
            .unwrap_or_else(|| config::DEFAULT_API_BASE_URL.to_string());
        // Building the HTTP client only fails on broken TLS setups; there
        // is nothing useful the app can do without it.
        let api = Client::new(api_url).expect("failed to build HTTP client");

        let toast_duration = Duration::from_millis(
            config
                .toast_duration_ms
                .unwrap_or(config::DEFAULT_TOAST_DURATION_MS),
        );

        let (identity, identity_warning) = Identity::load();

        let mut app = App {
            i18n,
            screen: Screen::Directory,
            directory: directory::State::new(),
            profile: None,
            register: register::State::new(),
            items: Vec::new(),
            toasts: Registry::new(),
            toast_duration,
            identity,
            api,
        };

        // Every screen declares its toasts up front so triggers anywhere in
        // the update loop resolve to a registered definition.
        app.toasts.bulk_register(directory::toast_catalog(&app.i18n));
        app.toasts.bulk_register(profile::toast_catalog(&app.i18n));
        app.toasts.bulk_register(register::toast_catalog(&app.i18n));
        app.toasts.bulk_register(app_toast_catalog(&app.i18n));

        app.directory.loading = true;
        let mut tasks = vec![update::load_survivors(&app), update::load_items(&app)];
        if let Some(key) = identity_warning {
            tasks.push(app.trigger(&key));
        }

        (app, Task::batch(tasks))
    }

    fn title(&self) -> String {
        self.i18n.tr("app-title")
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        subscription::create_tick_subscription(self.toasts.any_open())
    }

    /// Opens the toast registered under `id` and schedules its auto-close.
    ///
    /// An id with no registered definition, or one that is already open, is
    /// a silent no-op with no timer scheduled.
    fn trigger(&mut self, id: &str) -> Task<Message> {
        if self.toasts.open(id) {
            let generation = self.toasts.get(id).map_or(0, Entry::generation);
            toasts::close_after(id.to_string(), generation, self.toast_duration)
                .map(Message::Toast)
        } else {
            Task::none()
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Directory(directory_message) => {
                update::handle_directory_message(self, directory_message)
            }
            Message::Profile(profile_message) => {
                update::handle_profile_message(self, profile_message)
            }
            Message::Register(register_message) => {
                update::handle_register_message(self, register_message)
            }
            Message::Navbar(navbar_message) => update::handle_navbar_message(self, navbar_message),
            Message::Toast(toast_message) => {
                self.toasts.handle_message(&toast_message);
                Task::none()
            }
            Message::ItemsLoaded(result) => update::handle_items_loaded(self, result),
            // Redraws are driven by the subscription itself; the countdown
            // bars read the clock during view().
            Message::Tick(_instant) => Task::none(),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(self)
    }
}

/// Loads the config through the path-override layer, falling back to
/// defaults when the directory cannot be resolved or the file is absent.
fn load_config() -> Config {
    let Some(path) = paths::get_app_config_dir().map(|dir| dir.join(config::CONFIG_FILE)) else {
        return Config::default();
    };
    if !path.exists() {
        return Config::default();
    }
    config::load_from_path(&path).unwrap_or_default()
}

/// Toasts owned by the application itself rather than a single screen:
/// item catalog fetches and identity persistence.
fn app_toast_catalog(i18n: &I18n) -> Vec<(String, Definition)> {
    vec![
        (
            "load-items-error".to_string(),
            Definition::error(
                i18n.tr("toast-load-items-error-title"),
                i18n.tr("toast-load-items-error-description"),
            ),
        ),
        (
            "load-items-data-corrupted".to_string(),
            Definition::error(
                i18n.tr("toast-load-items-data-corrupted-title"),
                i18n.tr("toast-load-items-data-corrupted-description"),
            ),
        ),
        (
            "identity-read-error".to_string(),
            Definition::warning(
                i18n.tr("toast-identity-read-error-title"),
                i18n.tr("toast-identity-read-error-description"),
            ),
        ),
        (
            "identity-write-error".to_string(),
            Definition::warning(
                i18n.tr("toast-identity-write-error-title"),
                i18n.tr("toast-identity-write-error-description"),
            ),
        ),
    ]
}
