// SPDX-License-Identifier: MPL-2.0
//! Survivor directory screen: searchable list of everyone known to the
//! outpost, with an optional maximum-distance filter.
//!
//! The name search is applied client-side on the fetched list; the distance
//! filter is sent to the backend, which can only compute distances when the
//! caller has an identity.

use crate::api::types::Survivor;
use crate::error::Error;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::toasts::Definition;
use iced::widget::{button, scrollable, text_input, Column, Container, Row, Text};
use iced::{Element, Length, Theme};

/// Screen state.
#[derive(Debug, Default)]
pub struct State {
    pub survivors: Vec<Survivor>,
    pub loading: bool,
    pub search: String,
    pub max_distance_input: String,
}

#[derive(Debug, Clone)]
pub enum Message {
    Refresh,
    Loaded(Result<Vec<Survivor>, Error>),
    SearchChanged(String),
    MaxDistanceChanged(String),
    /// User asked to open a survivor's profile.
    Select(String),
}

/// Side effects requested from the parent application.
#[derive(Debug, Clone)]
pub enum Effect {
    None,
    /// Fetch the survivor list from the backend.
    Load { max_distance: Option<f64> },
    OpenProfile(String),
    /// Trigger the toast registered under this id.
    Toast(String),
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parsed maximum-distance filter. Empty or unparsable input means no
    /// filter; negative values are ignored rather than rejected loudly.
    #[must_use]
    pub fn max_distance(&self) -> Option<f64> {
        self.max_distance_input
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|d| *d > 0.0)
    }

    /// Survivors matching the current name search, case-insensitively.
    pub fn filtered_survivors(&self) -> impl Iterator<Item = &Survivor> {
        let needle = self.search.trim().to_lowercase();
        self.survivors
            .iter()
            .filter(move |s| needle.is_empty() || s.name.to_lowercase().contains(&needle))
    }

    pub fn update(&mut self, message: Message) -> Effect {
        match message {
            Message::Refresh => {
                self.loading = true;
                Effect::Load {
                    max_distance: self.max_distance(),
                }
            }
            Message::Loaded(Ok(survivors)) => {
                self.loading = false;
                self.survivors = survivors;
                Effect::None
            }
            Message::Loaded(Err(error)) => {
                self.loading = false;
                Effect::Toast(error.toast_key("load-survivors"))
            }
            Message::SearchChanged(value) => {
                self.search = value;
                Effect::None
            }
            Message::MaxDistanceChanged(value) => {
                self.max_distance_input = value;
                Effect::None
            }
            Message::Select(id) => Effect::OpenProfile(id),
        }
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let title = Text::new(i18n.tr("directory-title")).size(typography::TITLE_LG);

        let search_input = text_input(&i18n.tr("directory-search-placeholder"), &self.search)
            .on_input(Message::SearchChanged)
            .padding(spacing::XS);
        let distance_input = text_input(
            &i18n.tr("directory-max-distance-placeholder"),
            &self.max_distance_input,
        )
        .on_input(Message::MaxDistanceChanged)
        .on_submit(Message::Refresh)
        .padding(spacing::XS)
        .width(Length::Fixed(sizing::CARD_WIDTH / 2.0));
        let refresh_button = button(Text::new(i18n.tr("directory-refresh-button")))
            .on_press(Message::Refresh)
            .padding(spacing::XS);

        let filters = Row::new()
            .spacing(spacing::SM)
            .push(search_input)
            .push(distance_input)
            .push(refresh_button);

        let mut content = Column::new()
            .spacing(spacing::MD)
            .padding(spacing::LG)
            .push(title)
            .push(filters);

        if self.loading {
            content = content.push(Text::new(i18n.tr("directory-loading")).size(typography::BODY));
        } else {
            let cards: Vec<Element<'a, Message>> = self
                .filtered_survivors()
                .map(|survivor| survivor_card(survivor, i18n))
                .collect();

            if cards.is_empty() {
                content =
                    content.push(Text::new(i18n.tr("directory-empty")).size(typography::BODY));
            } else {
                let list = Column::with_children(cards).spacing(spacing::SM);
                content = content.push(scrollable(list).height(Length::Fill));
            }
        }

        content.width(Length::Fill).into()
    }
}

fn survivor_card<'a>(survivor: &'a Survivor, i18n: &'a I18n) -> Element<'a, Message> {
    let mut details = Column::new().spacing(spacing::XXS);
    details = details.push(Text::new(survivor.name.as_str()).size(typography::TITLE_SM));
    details = details.push(
        Text::new(format!(
            "{} {} \u{00B7} {}",
            i18n.tr("directory-age-label"),
            survivor.age,
            survivor.gender
        ))
        .size(typography::BODY),
    );
    if let Some(distance) = survivor.last_location.distance {
        details = details.push(
            Text::new(format!(
                "{distance:.1} {}",
                i18n.tr("directory-distance-suffix")
            ))
            .size(typography::CAPTION),
        );
    }
    details = details.push(
        Text::new(format!(
            "{}: {}",
            i18n.tr("directory-reports-label"),
            survivor.report_count()
        ))
        .size(typography::CAPTION),
    );

    let mut row = Row::new()
        .spacing(spacing::SM)
        .align_y(iced::alignment::Vertical::Center)
        .push(details.width(Length::Fill));

    if let Some(id) = survivor.id.as_deref() {
        row = row.push(
            button(Text::new(i18n.tr("directory-view-profile")))
                .on_press(Message::Select(id.to_string()))
                .padding(spacing::XS),
        );
    }

    Container::new(row)
        .padding(spacing::SM)
        .width(Length::Fill)
        .style(|theme: &Theme| iced::widget::container::Style {
            background: Some(theme.extended_palette().background.weak.color.into()),
            border: iced::Border {
                radius: crate::ui::design_tokens::radius::SM.into(),
                ..Default::default()
            },
            ..Default::default()
        })
        .into()
}

/// Toast definitions this screen can trigger.
pub fn toast_catalog(i18n: &I18n) -> Vec<(String, Definition)> {
    vec![
        (
            "load-survivors-error".to_string(),
            Definition::error(
                i18n.tr("toast-load-survivors-error-title"),
                i18n.tr("toast-load-survivors-error-description"),
            ),
        ),
        (
            "load-survivors-data-corrupted".to_string(),
            Definition::error(
                i18n.tr("toast-load-survivors-data-corrupted-title"),
                i18n.tr("toast-load-survivors-data-corrupted-description"),
            ),
        ),
    ]
}
