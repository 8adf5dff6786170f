// SPDX-License-Identifier: MPL-2.0
//! Navigation bar module for app-level navigation.
//!
//! The navbar shows the app name, buttons for switching between the
//! directory and registration screens, and the current identity (or an
//! anonymous marker when no identity is persisted).

use crate::app::Screen;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{opacity, spacing, typography};
use iced::{
    alignment::Vertical,
    widget::{button, Container, Row, Text},
    Color, Element, Length, Theme,
};

/// Contextual data needed to render the navbar.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub screen: Screen,
    /// Display name of the identified survivor, if any.
    pub identity_name: Option<&'a str>,
}

/// Messages emitted by the navbar.
#[derive(Debug, Clone)]
pub enum Message {
    OpenDirectory,
    OpenRegister,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone)]
pub enum Event {
    OpenDirectory,
    OpenRegister,
}

/// Process a navbar message and return the corresponding event.
pub fn update(message: Message) -> Event {
    match message {
        Message::OpenDirectory => Event::OpenDirectory,
        Message::OpenRegister => Event::OpenRegister,
    }
}

/// Render the navigation bar.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let app_name = Text::new(ctx.i18n.tr("app-title")).size(typography::TITLE_MD);

    let directory_button = nav_button(
        ctx.i18n.tr("navbar-directory-button"),
        Message::OpenDirectory,
        ctx.screen == Screen::Directory || ctx.screen == Screen::Profile,
    );
    let register_button = nav_button(
        ctx.i18n.tr("navbar-register-button"),
        Message::OpenRegister,
        ctx.screen == Screen::Register,
    );

    let identity_label = match ctx.identity_name {
        Some(name) => format!("{} {name}", ctx.i18n.tr("navbar-identity-prefix")),
        None => ctx.i18n.tr("navbar-anonymous"),
    };
    let identity_text =
        Text::new(identity_label)
            .size(typography::BODY)
            .style(|theme: &Theme| iced::widget::text::Style {
                color: Some(Color {
                    a: opacity::OVERLAY_STRONG,
                    ..theme.palette().text
                }),
            });

    let row = Row::new()
        .spacing(spacing::SM)
        .padding(spacing::SM)
        .align_y(Vertical::Center)
        .push(app_name)
        .push(directory_button)
        .push(register_button)
        .push(iced::widget::space::horizontal())
        .push(identity_text);

    Container::new(row)
        .width(Length::Fill)
        .style(|theme: &Theme| iced::widget::container::Style {
            background: Some(theme.extended_palette().background.weak.color.into()),
            ..Default::default()
        })
        .into()
}

fn nav_button(label: String, message: Message, selected: bool) -> Element<'static, Message> {
    let styled = if selected {
        button(Text::new(label)).style(button::primary)
    } else {
        button(Text::new(label)).style(button::secondary)
    };
    styled.on_press(message).padding(spacing::XS).into()
}
