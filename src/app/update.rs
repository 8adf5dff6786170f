// SPDX-License-Identifier: MPL-2.0
//! Message handlers for the application update loop.
//!
//! Each handler routes a component message into the component's `update`,
//! then translates the returned effect into tasks: API calls run on cloned
//! client handles inside `Task::perform`, and toast effects go through
//! `App::trigger` so every open cycle gets its auto-close timer.

use crate::api::types::{Item, Survivor};
use crate::error::Error;
use crate::ui::directory;
use crate::ui::navbar;
use crate::ui::profile;
use crate::ui::register;
use iced::Task;

use super::persisted_state::Identity;
use super::{App, Message, Screen};

/// Fetches the survivor list with the directory's current distance filter.
pub(super) fn load_survivors(app: &App) -> Task<Message> {
    let api = app.api.clone();
    let identity = app.identity.survivor_id.clone();
    let max_distance = app.directory.max_distance();
    Task::perform(
        async move { api.survivors(identity.as_deref(), max_distance).await },
        |result| Message::Directory(directory::Message::Loaded(result)),
    )
}

/// Fetches the shared item catalog.
pub(super) fn load_items(app: &App) -> Task<Message> {
    let api = app.api.clone();
    Task::perform(async move { api.items().await }, Message::ItemsLoaded)
}

fn load_profile(app: &App, survivor_id: String) -> Task<Message> {
    let api = app.api.clone();
    Task::perform(
        async move { api.survivor(&survivor_id).await },
        |result| Message::Profile(profile::Message::Loaded(result)),
    )
}

/// Fetches the viewer's own profile so the trade form knows their
/// inventory. A no-op while anonymous.
fn load_viewer(app: &App) -> Task<Message> {
    let Some(identity) = app.identity.survivor_id.clone() else {
        return Task::none();
    };
    let api = app.api.clone();
    Task::perform(
        async move { api.survivor(&identity).await },
        |result| Message::Profile(profile::Message::ViewerLoaded(result)),
    )
}

pub(super) fn handle_directory_message(
    app: &mut App,
    message: directory::Message,
) -> Task<Message> {
    match app.directory.update(message) {
        directory::Effect::None => Task::none(),
        // The effect's filter is the same one load_survivors reads back
        // from the directory state.
        directory::Effect::Load { .. } => load_survivors(app),
        directory::Effect::OpenProfile(survivor_id) => open_profile(app, survivor_id),
        directory::Effect::Toast(id) => app.trigger(&id),
    }
}

/// Switches to the profile screen and starts the fetches it needs.
fn open_profile(app: &mut App, survivor_id: String) -> Task<Message> {
    let state = profile::State::new(
        survivor_id.clone(),
        app.identity.survivor_id.clone(),
        app.items.clone(),
    );
    let needs_viewer = !state.is_own_profile();
    app.profile = Some(state);
    app.screen = Screen::Profile;

    let mut tasks = vec![load_profile(app, survivor_id)];
    if needs_viewer {
        tasks.push(load_viewer(app));
    }
    Task::batch(tasks)
}

pub(super) fn handle_profile_message(app: &mut App, message: profile::Message) -> Task<Message> {
    let effect = match app.profile.as_mut() {
        Some(state) => state.update(message),
        None => return Task::none(),
    };
    let profile_id = app.profile.as_ref().map(|p| p.survivor_id.clone());

    match effect {
        profile::Effect::None => Task::none(),
        profile::Effect::Back => {
            app.screen = Screen::Directory;
            app.profile = None;
            Task::none()
        }
        profile::Effect::UpdateLocation {
            latitude,
            longitude,
        } => {
            let Some(identity) = app.identity.survivor_id.clone() else {
                return app.trigger("location-update-unauthorized");
            };
            let api = app.api.clone();
            Task::perform(
                async move { api.update_location(&identity, latitude, longitude).await },
                |result| Message::Profile(profile::Message::LocationUpdated(result)),
            )
        }
        profile::Effect::Report => {
            let Some(identity) = app.identity.survivor_id.clone() else {
                return app.trigger("report-unauthorized");
            };
            let Some(reported_id) = profile_id else {
                return Task::none();
            };
            let api = app.api.clone();
            Task::perform(
                async move { api.report_infection(&identity, &reported_id).await },
                |result| Message::Profile(profile::Message::Reported(result)),
            )
        }
        profile::Effect::Trade(request) => {
            let Some(identity) = app.identity.survivor_id.clone() else {
                return Task::none();
            };
            let api = app.api.clone();
            Task::perform(
                async move { api.trade(&identity, request).await },
                |result| Message::Profile(profile::Message::TradeCompleted(result)),
            )
        }
        profile::Effect::Toast(id) => app.trigger(&id),
        profile::Effect::Refetch { toast } => {
            // Server state changed: refresh everything the change touches.
            let mut tasks = vec![app.trigger(&toast)];
            if let Some(survivor_id) = profile_id {
                tasks.push(load_profile(app, survivor_id));
            }
            if app.profile.as_ref().is_some_and(|p| !p.is_own_profile()) {
                tasks.push(load_viewer(app));
            }
            tasks.push(load_survivors(app));
            Task::batch(tasks)
        }
    }
}

pub(super) fn handle_register_message(app: &mut App, message: register::Message) -> Task<Message> {
    match app.register.update(message) {
        register::Effect::None => Task::none(),
        register::Effect::Submit(payload) => {
            let api = app.api.clone();
            Task::perform(
                async move { api.create_survivor(payload).await },
                |result| Message::Register(register::Message::Created(result)),
            )
        }
        register::Effect::Registered(survivor) => {
            adopt_identity(app, &survivor, "registration-success")
        }
        register::Effect::SignIn(query) => {
            let api = app.api.clone();
            Task::perform(
                async move { api.survivor(&query).await },
                |result| Message::Register(register::Message::SignedIn(result)),
            )
        }
        register::Effect::Identified(survivor) => adopt_identity(app, &survivor, "signin-success"),
        register::Effect::Toast(id) => app.trigger(&id),
    }
}

/// Stores `survivor` as the local identity and returns to the directory.
/// Used for both registration and sign-in.
fn adopt_identity(app: &mut App, survivor: &Survivor, success_toast: &str) -> Task<Message> {
    app.identity = Identity {
        survivor_id: survivor.id.clone(),
        name: Some(survivor.name.clone()),
    };

    let mut tasks = Vec::new();
    if let Some(key) = app.identity.save() {
        tasks.push(app.trigger(&key));
    }
    tasks.push(app.trigger(success_toast));

    app.register = register::State::new();
    app.screen = Screen::Directory;
    app.directory.loading = true;
    tasks.push(load_survivors(app));

    Task::batch(tasks)
}

pub(super) fn handle_navbar_message(app: &mut App, message: navbar::Message) -> Task<Message> {
    match navbar::update(message) {
        navbar::Event::OpenDirectory => {
            app.screen = Screen::Directory;
            app.profile = None;
            Task::none()
        }
        navbar::Event::OpenRegister => {
            app.screen = Screen::Register;
            Task::none()
        }
    }
}

pub(super) fn handle_items_loaded(
    app: &mut App,
    result: Result<Vec<Item>, Error>,
) -> Task<Message> {
    match result {
        Ok(items) => {
            if let Some(profile) = app.profile.as_mut() {
                profile.items = items.clone();
            }
            app.items = items;
            Task::none()
        }
        Err(error) => {
            let key = error.toast_key("load-items");
            app.trigger(&key)
        }
    }
}
