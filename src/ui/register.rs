// SPDX-License-Identifier: MPL-2.0
//! Registration screen: the form a newcomer fills in to join the
//! directory, plus a sign-in lookup for survivors who already have an
//! entry. Either path ends with the survivor becoming the local identity.

use crate::api::types::{Gender, Inventory, Item, LatLon, NewSurvivor, Survivor};
use crate::error::Error;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::toasts::Definition;
use iced::widget::{button, pick_list, scrollable, text_input, Column, Row, Text};
use iced::{Element, Length};

#[derive(Debug, Default)]
pub struct State {
    pub name: String,
    pub age_input: String,
    pub gender: Option<Gender>,
    pub latitude_input: String,
    pub longitude_input: String,
    pub inventory: Inventory,
    pub submitting: bool,
    /// Name or id entered in the sign-in lookup.
    pub signin_input: String,
    pub signing_in: bool,
}

#[derive(Debug, Clone)]
pub enum Message {
    NameChanged(String),
    AgeChanged(String),
    GenderSelected(Gender),
    LatitudeChanged(String),
    LongitudeChanged(String),
    InventoryChanged { item_id: String, delta: i64 },
    Submit,
    Created(Result<Survivor, Error>),
    SignInChanged(String),
    SignIn,
    SignedIn(Result<Survivor, Error>),
}

/// Side effects requested from the parent application.
#[derive(Debug, Clone)]
pub enum Effect {
    None,
    Submit(NewSurvivor),
    /// Registration succeeded; the parent adopts the new identity.
    Registered(Survivor),
    /// Look up an existing survivor by name or id.
    SignIn(String),
    /// Sign-in lookup succeeded; the parent adopts the found identity.
    Identified(Survivor),
    /// Trigger the toast registered under this id.
    Toast(String),
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the payload when every field validates, `None` otherwise.
    #[must_use]
    pub fn validated(&self) -> Option<NewSurvivor> {
        let name = self.name.trim();
        if name.is_empty() {
            return None;
        }
        let age = self.age_input.trim().parse::<u32>().ok().filter(|a| *a > 0)?;
        let gender = self.gender?;
        let latitude = self.latitude_input.trim().parse::<f64>().ok()?;
        let longitude = self.longitude_input.trim().parse::<f64>().ok()?;
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return None;
        }
        Some(NewSurvivor {
            name: name.to_string(),
            age,
            gender,
            last_location: LatLon {
                id: None,
                latitude,
                longitude,
                distance: None,
            },
            inventory: self.inventory.clone(),
        })
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.submitting && self.validated().is_some()
    }

    pub fn update(&mut self, message: Message) -> Effect {
        match message {
            Message::NameChanged(value) => {
                self.name = value;
                Effect::None
            }
            Message::AgeChanged(value) => {
                self.age_input = value;
                Effect::None
            }
            Message::GenderSelected(gender) => {
                self.gender = Some(gender);
                Effect::None
            }
            Message::LatitudeChanged(value) => {
                self.latitude_input = value;
                Effect::None
            }
            Message::LongitudeChanged(value) => {
                self.longitude_input = value;
                Effect::None
            }
            Message::InventoryChanged { item_id, delta } => {
                let current = i64::from(self.inventory.get(&item_id).copied().unwrap_or(0));
                let next = (current + delta).max(0);
                if next == 0 {
                    self.inventory.remove(&item_id);
                } else {
                    self.inventory.insert(item_id, next as u32);
                }
                Effect::None
            }
            Message::Submit => match self.validated() {
                Some(payload) if !self.submitting => {
                    self.submitting = true;
                    Effect::Submit(payload)
                }
                _ => Effect::None,
            },
            Message::Created(Ok(survivor)) => {
                self.submitting = false;
                Effect::Registered(survivor)
            }
            Message::Created(Err(error)) => {
                self.submitting = false;
                Effect::Toast(error.toast_key("registration"))
            }
            Message::SignInChanged(value) => {
                self.signin_input = value;
                Effect::None
            }
            Message::SignIn => {
                let query = self.signin_input.trim();
                if query.is_empty() || self.signing_in {
                    Effect::None
                } else {
                    self.signing_in = true;
                    Effect::SignIn(query.to_string())
                }
            }
            Message::SignedIn(Ok(survivor)) => {
                self.signing_in = false;
                Effect::Identified(survivor)
            }
            Message::SignedIn(Err(error)) => {
                self.signing_in = false;
                Effect::Toast(error.toast_key("signin"))
            }
        }
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n, items: &'a [Item]) -> Element<'a, Message> {
        let title = Text::new(i18n.tr("register-title")).size(typography::TITLE_LG);

        let name_input = text_input(&i18n.tr("register-name-placeholder"), &self.name)
            .on_input(Message::NameChanged)
            .padding(spacing::XS);
        let age_input = text_input(&i18n.tr("register-age-placeholder"), &self.age_input)
            .on_input(Message::AgeChanged)
            .padding(spacing::XS);
        let gender_picker = pick_list(Gender::ALL, self.gender, Message::GenderSelected)
            .placeholder(i18n.tr("register-gender-label"))
            .padding(spacing::XS);
        let latitude_input = text_input(
            &i18n.tr("register-latitude-placeholder"),
            &self.latitude_input,
        )
        .on_input(Message::LatitudeChanged)
        .padding(spacing::XS);
        let longitude_input = text_input(
            &i18n.tr("register-longitude-placeholder"),
            &self.longitude_input,
        )
        .on_input(Message::LongitudeChanged)
        .padding(spacing::XS);

        let mut inventory_column = Column::new()
            .spacing(spacing::XS)
            .push(Text::new(i18n.tr("register-inventory-title")).size(typography::TITLE_SM));
        for item in items {
            let quantity = self.inventory.get(&item.id).copied().unwrap_or(0);
            let minus = button(Text::new("\u{2212}").size(typography::BODY))
                .on_press(Message::InventoryChanged {
                    item_id: item.id.clone(),
                    delta: -1,
                })
                .padding(spacing::XXS);
            let plus = button(Text::new("+").size(typography::BODY))
                .on_press(Message::InventoryChanged {
                    item_id: item.id.clone(),
                    delta: 1,
                })
                .padding(spacing::XXS);
            inventory_column = inventory_column.push(
                Row::new()
                    .spacing(spacing::XS)
                    .align_y(iced::alignment::Vertical::Center)
                    .push(
                        Text::new(format!("{} \u{00D7} {quantity}", item.label))
                            .size(typography::BODY)
                            .width(Length::Fixed(sizing::CARD_WIDTH / 1.5)),
                    )
                    .push(minus)
                    .push(plus),
            );
        }

        let submit_label = if self.submitting {
            i18n.tr("register-submitting")
        } else {
            i18n.tr("register-submit-button")
        };
        let mut submit_button = button(Text::new(submit_label)).padding(spacing::XS);
        if self.can_submit() {
            submit_button = submit_button.on_press(Message::Submit);
        }

        let signin_input = text_input(
            &i18n.tr("register-signin-placeholder"),
            &self.signin_input,
        )
        .on_input(Message::SignInChanged)
        .on_submit(Message::SignIn)
        .padding(spacing::XS);
        let mut signin_button =
            button(Text::new(i18n.tr("register-signin-button"))).padding(spacing::XS);
        if !self.signing_in && !self.signin_input.trim().is_empty() {
            signin_button = signin_button.on_press(Message::SignIn);
        }
        let signin_section = Column::new()
            .spacing(spacing::XS)
            .push(Text::new(i18n.tr("register-signin-title")).size(typography::TITLE_SM))
            .push(
                Row::new()
                    .spacing(spacing::SM)
                    .push(signin_input)
                    .push(signin_button),
            );

        let form = Column::new()
            .spacing(spacing::SM)
            .width(Length::Fixed(sizing::FORM_WIDTH))
            .push(title)
            .push(name_input)
            .push(age_input)
            .push(gender_picker)
            .push(latitude_input)
            .push(longitude_input)
            .push(inventory_column)
            .push(submit_button)
            .push(signin_section);

        scrollable(
            Column::new()
                .padding(spacing::LG)
                .width(Length::Fill)
                .align_x(iced::alignment::Horizontal::Center)
                .push(form),
        )
        .into()
    }
}

/// Toast definitions this screen can trigger.
pub fn toast_catalog(i18n: &I18n) -> Vec<(String, Definition)> {
    vec![
        (
            "registration-success".to_string(),
            Definition::success(
                i18n.tr("toast-registration-success-title"),
                i18n.tr("toast-registration-success-description"),
            ),
        ),
        (
            "registration-error".to_string(),
            Definition::error(
                i18n.tr("toast-registration-error-title"),
                i18n.tr("toast-registration-error-description"),
            ),
        ),
        (
            "signin-success".to_string(),
            Definition::success(
                i18n.tr("toast-signin-success-title"),
                i18n.tr("toast-signin-success-description"),
            ),
        ),
        (
            "signin-not-found".to_string(),
            Definition::error(
                i18n.tr("toast-signin-not-found-title"),
                i18n.tr("toast-signin-not-found-description"),
            ),
        ),
        (
            "signin-error".to_string(),
            Definition::error(
                i18n.tr("toast-signin-error-title"),
                i18n.tr("toast-signin-error-description"),
            ),
        ),
        (
            "signin-data-corrupted".to_string(),
            Definition::error(
                i18n.tr("toast-signin-data-corrupted-title"),
                i18n.tr("toast-signin-data-corrupted-description"),
            ),
        ),
    ]
}
