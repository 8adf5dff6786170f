// SPDX-License-Identifier: MPL-2.0
//! Top-level view composition: navbar, active screen, toast overlay.

use super::{App, Message, Screen};
use crate::ui::navbar;
use crate::ui::toasts::Overlay;
use iced::widget::{Column, Stack};
use iced::{Element, Length};
use std::time::Instant;

pub(super) fn view(app: &App) -> Element<'_, Message> {
    let navbar = navbar::view(navbar::ViewContext {
        i18n: &app.i18n,
        screen: app.screen,
        identity_name: app.identity.name.as_deref(),
    })
    .map(Message::Navbar);

    let screen: Element<'_, Message> = match app.screen {
        Screen::Directory => app.directory.view(&app.i18n).map(Message::Directory),
        Screen::Profile => match app.profile.as_ref() {
            Some(profile) => profile.view(&app.i18n).map(Message::Profile),
            // A profile screen without state falls back to the directory.
            None => app.directory.view(&app.i18n).map(Message::Directory),
        },
        Screen::Register => app
            .register
            .view(&app.i18n, &app.items)
            .map(Message::Register),
    };

    let content = Column::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(navbar)
        .push(screen);

    let overlay =
        Overlay::view_overlay(&app.toasts, app.toast_duration, Instant::now()).map(Message::Toast);

    Stack::with_children(vec![content.into(), overlay]).into()
}
