// SPDX-License-Identifier: MPL-2.0
//! Survivor profile screen: details, last known location, infection
//! reporting, and item trading.
//!
//! The trade form enforces the backend's rule client-side: both offers
//! must have the same total worth before the trade button activates. The
//! location form only appears on the viewer's own profile, since the
//! backend rejects location updates for anyone else.

use crate::api::types::{Inventory, Item, Survivor, TradeRequest, TradeSide};
use crate::error::Error;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::toasts::Definition;
use iced::widget::{button, scrollable, text_input, Column, Container, Row, Text};
use iced::{Element, Length, Theme};

/// Which party's inventory an offer adjustment targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Mine,
    Theirs,
}

/// Screen state for one visited profile.
#[derive(Debug)]
pub struct State {
    pub survivor_id: String,
    pub survivor: Option<Survivor>,
    pub loading: bool,
    /// The viewer's own profile, fetched separately so the trade form can
    /// show what the viewer has to offer. `None` while anonymous.
    pub viewer: Option<Survivor>,
    /// The viewer's identity at the time the screen was opened.
    pub identity: Option<String>,
    /// Item catalog snapshot for labels and worth computation.
    pub items: Vec<Item>,
    pub latitude_input: String,
    pub longitude_input: String,
    pub offer_mine: Inventory,
    pub offer_theirs: Inventory,
}

#[derive(Debug, Clone)]
pub enum Message {
    Loaded(Result<Survivor, Error>),
    ViewerLoaded(Result<Survivor, Error>),
    LatitudeChanged(String),
    LongitudeChanged(String),
    SubmitLocation,
    LocationUpdated(Result<Survivor, Error>),
    Report,
    Reported(Result<(), Error>),
    OfferChanged {
        side: Side,
        item_id: String,
        delta: i64,
    },
    SubmitTrade,
    TradeCompleted(Result<Survivor, Error>),
    Back,
}

/// Side effects requested from the parent application.
#[derive(Debug, Clone)]
pub enum Effect {
    None,
    Back,
    UpdateLocation { latitude: f64, longitude: f64 },
    Report,
    Trade(TradeRequest),
    /// Trigger the toast registered under this id.
    Toast(String),
    /// Trigger a toast, then refetch the profile, the viewer, and the
    /// directory list (used after mutations that change server state).
    Refetch { toast: String },
}

impl State {
    #[must_use]
    pub fn new(survivor_id: String, identity: Option<String>, items: Vec<Item>) -> Self {
        Self {
            survivor_id,
            survivor: None,
            loading: true,
            viewer: None,
            identity,
            items,
            latitude_input: String::new(),
            longitude_input: String::new(),
            offer_mine: Inventory::new(),
            offer_theirs: Inventory::new(),
        }
    }

    /// Whether this profile belongs to the viewer.
    #[must_use]
    pub fn is_own_profile(&self) -> bool {
        self.identity.as_deref() == Some(self.survivor_id.as_str())
    }

    /// Total worth of an offer given the current item catalog. Items
    /// missing from the catalog count as worthless.
    #[must_use]
    pub fn offer_worth(&self, offer: &Inventory) -> u64 {
        offer
            .iter()
            .map(|(item_id, quantity)| {
                let worth = self
                    .items
                    .iter()
                    .find(|item| item.id == *item_id)
                    .map_or(0, |item| u64::from(item.worth));
                worth * u64::from(*quantity)
            })
            .sum()
    }

    /// Both offers carry the same total worth.
    #[must_use]
    pub fn trade_balanced(&self) -> bool {
        self.offer_worth(&self.offer_mine) == self.offer_worth(&self.offer_theirs)
    }

    /// Whether the trade button should be active.
    #[must_use]
    pub fn can_trade(&self) -> bool {
        self.identity.is_some()
            && !self.is_own_profile()
            && self.survivor.is_some()
            && self.viewer.is_some()
            && !(self.offer_mine.is_empty() && self.offer_theirs.is_empty())
            && self.trade_balanced()
    }

    /// Parsed location inputs, when both are in range.
    #[must_use]
    pub fn parsed_location(&self) -> Option<(f64, f64)> {
        let latitude = self.latitude_input.trim().parse::<f64>().ok()?;
        let longitude = self.longitude_input.trim().parse::<f64>().ok()?;
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return None;
        }
        Some((latitude, longitude))
    }

    pub fn update(&mut self, message: Message) -> Effect {
        match message {
            Message::Loaded(Ok(survivor)) => {
                self.loading = false;
                self.latitude_input = survivor.last_location.latitude.to_string();
                self.longitude_input = survivor.last_location.longitude.to_string();
                if self.is_own_profile() {
                    self.viewer = Some(survivor.clone());
                }
                self.survivor = Some(survivor);
                Effect::None
            }
            Message::Loaded(Err(error)) => {
                self.loading = false;
                Effect::Toast(error.toast_key("loadprofile"))
            }
            Message::ViewerLoaded(Ok(viewer)) => {
                self.viewer = Some(viewer);
                Effect::None
            }
            // The trade form stays disabled without viewer data; the
            // profile itself is still useful, so no toast here.
            Message::ViewerLoaded(Err(_)) => Effect::None,
            Message::LatitudeChanged(value) => {
                self.latitude_input = value;
                Effect::None
            }
            Message::LongitudeChanged(value) => {
                self.longitude_input = value;
                Effect::None
            }
            Message::SubmitLocation => match self.parsed_location() {
                Some((latitude, longitude)) => Effect::UpdateLocation {
                    latitude,
                    longitude,
                },
                None => Effect::None,
            },
            Message::LocationUpdated(Ok(survivor)) => {
                if self.is_own_profile() {
                    self.viewer = Some(survivor.clone());
                    self.survivor = Some(survivor);
                }
                Effect::Toast("location-update-success".to_string())
            }
            Message::LocationUpdated(Err(error)) => {
                Effect::Toast(error.toast_key("location-update"))
            }
            Message::Report => Effect::Report,
            Message::Reported(Ok(())) => Effect::Refetch {
                toast: "report-success".to_string(),
            },
            Message::Reported(Err(error)) => Effect::Toast(error.toast_key("report")),
            Message::OfferChanged {
                side,
                item_id,
                delta,
            } => {
                self.adjust_offer(side, &item_id, delta);
                Effect::None
            }
            Message::SubmitTrade => {
                if !self.can_trade() {
                    return Effect::None;
                }
                // can_trade guarantees the identity is present.
                let Some(identity) = self.identity.clone() else {
                    return Effect::None;
                };
                Effect::Trade(TradeRequest {
                    survivor_a_items: TradeSide {
                        survivor_id: identity,
                        items: self.offer_mine.clone(),
                    },
                    survivor_b_items: TradeSide {
                        survivor_id: self.survivor_id.clone(),
                        items: self.offer_theirs.clone(),
                    },
                })
            }
            Message::TradeCompleted(Ok(_)) => {
                self.offer_mine.clear();
                self.offer_theirs.clear();
                Effect::Refetch {
                    toast: "trade-success".to_string(),
                }
            }
            Message::TradeCompleted(Err(error)) => Effect::Toast(error.toast_key("trade")),
            Message::Back => Effect::Back,
        }
    }

    /// Clamps an offer quantity to what the holder actually owns.
    fn adjust_offer(&mut self, side: Side, item_id: &str, delta: i64) {
        let holder = match side {
            Side::Mine => self.viewer.as_ref(),
            Side::Theirs => self.survivor.as_ref(),
        };
        let available = holder
            .and_then(|s| s.inventory.get(item_id).copied())
            .unwrap_or(0);
        let offer = match side {
            Side::Mine => &mut self.offer_mine,
            Side::Theirs => &mut self.offer_theirs,
        };
        let current = i64::from(offer.get(item_id).copied().unwrap_or(0));
        let next = (current + delta).clamp(0, i64::from(available));
        if next == 0 {
            offer.remove(item_id);
        } else {
            offer.insert(item_id.to_string(), next as u32);
        }
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let back_button = button(Text::new(i18n.tr("profile-back-button")))
            .on_press(Message::Back)
            .padding(spacing::XS);

        let mut content = Column::new()
            .spacing(spacing::MD)
            .padding(spacing::LG)
            .push(back_button);

        if self.loading {
            content = content.push(Text::new(i18n.tr("profile-loading")).size(typography::BODY));
            return content.width(Length::Fill).into();
        }

        let Some(survivor) = self.survivor.as_ref() else {
            content = content.push(Text::new(i18n.tr("directory-empty")).size(typography::BODY));
            return content.width(Length::Fill).into();
        };

        content = content
            .push(self.details_section(survivor, i18n))
            .push(self.inventory_section(survivor, i18n))
            .push(self.location_section(survivor, i18n));

        if !self.is_own_profile() {
            content = content.push(self.report_section(i18n));
            content = content.push(self.trade_section(survivor, i18n));
        }

        scrollable(content.width(Length::Fill)).into()
    }

    fn details_section<'a>(&'a self, survivor: &'a Survivor, i18n: &'a I18n) -> Element<'a, Message> {
        let gauge = i18n.tr_with_args(
            "profile-reports-gauge",
            &[("count", &survivor.report_count().to_string())],
        );

        section_container(
            Column::new()
                .spacing(spacing::XS)
                .push(Text::new(survivor.name.as_str()).size(typography::TITLE_LG))
                .push(
                    Text::new(format!(
                        "{} {} \u{00B7} {}",
                        i18n.tr("directory-age-label"),
                        survivor.age,
                        survivor.gender
                    ))
                    .size(typography::BODY),
                )
                .push(Text::new(gauge).size(typography::BODY)),
        )
    }

    fn inventory_section<'a>(
        &'a self,
        survivor: &'a Survivor,
        i18n: &'a I18n,
    ) -> Element<'a, Message> {
        let mut column = Column::new()
            .spacing(spacing::XS)
            .push(Text::new(i18n.tr("profile-inventory-title")).size(typography::TITLE_SM));

        if survivor.inventory.is_empty() {
            column =
                column.push(Text::new(i18n.tr("profile-inventory-empty")).size(typography::BODY));
        } else {
            for (item_id, quantity) in &survivor.inventory {
                column = column.push(
                    Text::new(format!("{} \u{00D7} {quantity}", self.item_label(item_id)))
                        .size(typography::BODY),
                );
            }
        }

        section_container(column)
    }

    fn location_section<'a>(
        &'a self,
        survivor: &'a Survivor,
        i18n: &'a I18n,
    ) -> Element<'a, Message> {
        let mut column = Column::new()
            .spacing(spacing::XS)
            .push(Text::new(i18n.tr("profile-location-title")).size(typography::TITLE_SM))
            .push(
                Text::new(format!(
                    "{:.4}, {:.4}",
                    survivor.last_location.latitude, survivor.last_location.longitude
                ))
                .size(typography::BODY),
            );

        // Only the profile owner can move their own pin.
        if self.is_own_profile() {
            let latitude_input =
                text_input(&i18n.tr("profile-latitude-placeholder"), &self.latitude_input)
                    .on_input(Message::LatitudeChanged)
                    .padding(spacing::XS)
                    .width(Length::Fixed(sizing::FORM_WIDTH / 2.0));
            let longitude_input = text_input(
                &i18n.tr("profile-longitude-placeholder"),
                &self.longitude_input,
            )
            .on_input(Message::LongitudeChanged)
            .padding(spacing::XS)
            .width(Length::Fixed(sizing::FORM_WIDTH / 2.0));

            let mut save_button = button(Text::new(i18n.tr("profile-save-location-button")))
                .padding(spacing::XS);
            if self.parsed_location().is_some() {
                save_button = save_button.on_press(Message::SubmitLocation);
            }

            column = column.push(
                Row::new()
                    .spacing(spacing::SM)
                    .push(latitude_input)
                    .push(longitude_input)
                    .push(save_button),
            );
        }

        section_container(column)
    }

    fn report_section<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let mut report_button =
            button(Text::new(i18n.tr("profile-report-button"))).padding(spacing::XS);
        if self.identity.is_some() {
            report_button = report_button.on_press(Message::Report);
        }
        section_container(Column::new().push(report_button))
    }

    fn trade_section<'a>(&'a self, survivor: &'a Survivor, i18n: &'a I18n) -> Element<'a, Message> {
        let mut column = Column::new()
            .spacing(spacing::SM)
            .push(Text::new(i18n.tr("profile-trade-title")).size(typography::TITLE_SM));

        if self.identity.is_none() {
            column = column
                .push(Text::new(i18n.tr("profile-trade-need-identity")).size(typography::BODY));
            return section_container(column);
        }

        let mine = self.offer_column(
            i18n.tr("profile-trade-yours"),
            self.viewer.as_ref().map(|v| &v.inventory),
            &self.offer_mine,
            Side::Mine,
            i18n,
        );
        let theirs = self.offer_column(
            i18n.tr("profile-trade-theirs"),
            Some(&survivor.inventory),
            &self.offer_theirs,
            Side::Theirs,
            i18n,
        );

        column = column.push(Row::new().spacing(spacing::LG).push(mine).push(theirs));

        if !self.trade_balanced() {
            column = column
                .push(Text::new(i18n.tr("profile-trade-unbalanced")).size(typography::CAPTION));
        }

        let mut trade_button =
            button(Text::new(i18n.tr("profile-trade-button"))).padding(spacing::XS);
        if self.can_trade() {
            trade_button = trade_button.on_press(Message::SubmitTrade);
        }
        column = column.push(trade_button);

        section_container(column)
    }

    fn offer_column<'a>(
        &'a self,
        title: String,
        inventory: Option<&'a Inventory>,
        offer: &'a Inventory,
        side: Side,
        i18n: &'a I18n,
    ) -> Element<'a, Message> {
        let worth = self.offer_worth(offer);
        let mut column = Column::new()
            .spacing(spacing::XS)
            .push(Text::new(title).size(typography::BODY_LG))
            .push(
                Text::new(format!("{}: {worth}", i18n.tr("profile-trade-worth")))
                    .size(typography::CAPTION),
            );

        if let Some(inventory) = inventory {
            for (item_id, available) in inventory {
                let offered = offer.get(item_id).copied().unwrap_or(0);
                let minus = button(Text::new("\u{2212}").size(typography::BODY))
                    .on_press(Message::OfferChanged {
                        side,
                        item_id: item_id.clone(),
                        delta: -1,
                    })
                    .padding(spacing::XXS);
                let plus = button(Text::new("+").size(typography::BODY))
                    .on_press(Message::OfferChanged {
                        side,
                        item_id: item_id.clone(),
                        delta: 1,
                    })
                    .padding(spacing::XXS);

                column = column.push(
                    Row::new()
                        .spacing(spacing::XS)
                        .align_y(iced::alignment::Vertical::Center)
                        .push(
                            Text::new(format!(
                                "{} ({offered}/{available})",
                                self.item_label(item_id)
                            ))
                            .size(typography::BODY)
                            .width(Length::Fixed(sizing::CARD_WIDTH / 1.5)),
                        )
                        .push(minus)
                        .push(plus),
                );
            }
        }

        column.into()
    }

    fn item_label(&self, item_id: &str) -> String {
        self.items
            .iter()
            .find(|item| item.id == item_id)
            .map_or_else(|| item_id.to_string(), |item| item.label.clone())
    }
}

fn section_container(content: Column<'_, Message>) -> Element<'_, Message> {
    Container::new(content)
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
            "loadprofile-not-found".to_string(),
            Definition::error(
                i18n.tr("toast-loadprofile-not-found-title"),
                i18n.tr("toast-loadprofile-not-found-description"),
            ),
        ),
        (
            "loadprofile-error".to_string(),
            Definition::error(
                i18n.tr("toast-loadprofile-error-title"),
                i18n.tr("toast-loadprofile-error-description"),
            ),
        ),
        (
            "loadprofile-data-corrupted".to_string(),
            Definition::error(
                i18n.tr("toast-loadprofile-data-corrupted-title"),
                i18n.tr("toast-loadprofile-data-corrupted-description"),
            ),
        ),
        (
            "location-update-success".to_string(),
            Definition::success(
                i18n.tr("toast-location-update-success-title"),
                i18n.tr("toast-location-update-success-description"),
            ),
        ),
        (
            "location-update-error".to_string(),
            Definition::error(
                i18n.tr("toast-location-update-error-title"),
                i18n.tr("toast-location-update-error-description"),
            ),
        ),
        (
            "location-update-unauthorized".to_string(),
            Definition::error(
                i18n.tr("toast-location-update-unauthorized-title"),
                i18n.tr("toast-location-update-unauthorized-description"),
            ),
        ),
        (
            "report-success".to_string(),
            Definition::success(
                i18n.tr("toast-report-success-title"),
                i18n.tr("toast-report-success-description"),
            ),
        ),
        (
            "report-unauthorized".to_string(),
            Definition::error(
                i18n.tr("toast-report-unauthorized-title"),
                i18n.tr("toast-report-unauthorized-description"),
            ),
        ),
        (
            "report-error".to_string(),
            Definition::error(
                i18n.tr("toast-report-error-title"),
                i18n.tr("toast-report-error-description"),
            ),
        ),
        (
            "trade-success".to_string(),
            Definition::success(
                i18n.tr("toast-trade-success-title"),
                i18n.tr("toast-trade-success-description"),
            ),
        ),
        (
            "trade-error".to_string(),
            Definition::error(
                i18n.tr("toast-trade-error-title"),
                i18n.tr("toast-trade-error-description"),
            ),
        ),
    ]
}
