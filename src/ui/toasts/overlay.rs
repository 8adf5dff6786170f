// SPDX-License-Identifier: MPL-2.0
//! Overlay widget projecting open toasts to visual elements.
//!
//! Each open entry renders as a small card with a severity-colored accent
//! border, optional title and description, a dismiss button, and a
//! countdown bar proportional to the remaining display duration. The
//! overlay stacks cards in the bottom-right corner.

use super::registry::{Message, Registry};
use super::toast::{Entry, Severity};
use crate::ui::design_tokens::{border, opacity, palette, radius, shadow, sizing, spacing, typography};
use iced::widget::{button, container, progress_bar, text, Column, Container, Row, Text};
use iced::{alignment, Color, Element, Length, Theme};
use std::time::{Duration, Instant};

/// Toast overlay widget configuration.
pub struct Overlay;

impl Overlay {
    /// Renders a single open toast.
    ///
    /// `now` is used to compute the countdown bar; the caller passes the
    /// current instant so every card in one frame agrees on the time.
    pub fn view<'a>(
        id: &'a str,
        entry: &'a Entry,
        duration: Duration,
        now: Instant,
    ) -> Element<'a, Message> {
        let severity = entry.definition().severity;
        let accent_color = severity.color();

        let glyph = Text::new(severity.glyph())
            .size(typography::BODY_LG)
            .color(accent_color);

        let mut body = Column::new().spacing(spacing::XXS).width(Length::Fill);
        if let Some(title) = entry.definition().title.as_deref() {
            body = body.push(
                Text::new(title)
                    .size(typography::BODY)
                    .style(|theme: &Theme| text::Style {
                        color: Some(theme.palette().text),
                    }),
            );
        }
        if let Some(description) = entry.definition().description.as_deref() {
            body = body.push(
                Text::new(description)
                    .size(typography::CAPTION)
                    .style(|theme: &Theme| text::Style {
                        color: Some(Color {
                            a: opacity::OVERLAY_STRONG,
                            ..theme.palette().text
                        }),
                    }),
            );
        }

        let dismiss_button = button(Text::new("\u{00D7}").size(typography::BODY))
            .on_press(Message::Dismiss(id.to_string()))
            .padding(spacing::XXS)
            .style(button::text);

        let content = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(Container::new(glyph).padding(spacing::XXS))
            .push(body)
            .push(dismiss_button);

        let countdown = progress_bar(0.0..=1.0, remaining_fraction(entry, duration, now))
            .girth(sizing::TOAST_PROGRESS_HEIGHT)
            .style(move |_theme: &Theme| progress_bar::Style {
                background: iced::Background::Color(Color {
                    a: opacity::OVERLAY_SUBTLE,
                    ..accent_color
                }),
                bar: iced::Background::Color(accent_color),
                border: iced::Border {
                    radius: radius::NONE.into(),
                    ..Default::default()
                },
            });

        let card = Column::new()
            .spacing(spacing::XXS)
            .push(content)
            .push(countdown);

        Container::new(card)
            .width(Length::Fixed(sizing::TOAST_WIDTH))
            .padding(spacing::SM)
            .style(move |theme: &Theme| toast_container_style(theme, accent_color))
            .into()
    }

    /// Renders the overlay with every currently open toast.
    ///
    /// Positions toasts in the bottom-right corner, stacked vertically in
    /// stable id order.
    pub fn view_overlay(
        registry: &Registry,
        duration: Duration,
        now: Instant,
    ) -> Element<'_, Message> {
        let toasts: Vec<Element<'_, Message>> = registry
            .open_entries()
            .map(|(id, entry)| Self::view(id, entry, duration, now))
            .collect();

        if toasts.is_empty() {
            // Empty container that takes no space.
            Container::new(text(""))
                .width(Length::Shrink)
                .height(Length::Shrink)
                .into()
        } else {
            let toast_column = Column::with_children(toasts)
                .spacing(spacing::XS)
                .align_x(alignment::Horizontal::Right);

            Container::new(toast_column)
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(alignment::Horizontal::Right)
                .align_y(alignment::Vertical::Bottom)
                .padding(spacing::MD)
                .into()
        }
    }
}

/// Fraction of the display duration still remaining for `entry`,
/// clamped to `[0, 1]`.
fn remaining_fraction(entry: &Entry, duration: Duration, now: Instant) -> f32 {
    let Some(opened_at) = entry.opened_at() else {
        return 0.0;
    };
    if duration.is_zero() {
        return 0.0;
    }
    let elapsed = now.saturating_duration_since(opened_at);
    let fraction = 1.0 - elapsed.as_secs_f32() / duration.as_secs_f32();
    fraction.clamp(0.0, 1.0)
}

/// Style function for the toast container.
fn toast_container_style(theme: &Theme, accent_color: Color) -> container::Style {
    let bg_color = theme.extended_palette().background.base.color;

    container::Style {
        background: Some(iced::Background::Color(Color {
            a: opacity::SURFACE,
            ..bg_color
        })),
        border: iced::Border {
            color: accent_color,
            width: border::WIDTH_MD,
            radius: radius::MD.into(),
        },
        shadow: shadow::MD,
        text_color: Some(theme.palette().text),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::toasts::toast::Definition;
    use crate::ui::toasts::Registry;

    #[test]
    fn toast_container_style_uses_accent_color() {
        let theme = Theme::Dark;
        let accent = palette::SUCCESS_500;
        let style = toast_container_style(&theme, accent);

        assert_eq!(style.border.color, accent);
        assert!(style.background.is_some());
    }

    #[test]
    fn remaining_fraction_is_full_at_open_and_empty_after_duration() {
        let mut registry = Registry::new();
        registry.register("trade-success", Definition::success("t", "d"));
        registry.open("trade-success");
        let entry = registry.get("trade-success").expect("registered");
        let opened_at = entry.opened_at().expect("open");
        let duration = Duration::from_millis(1500);

        let at_open = remaining_fraction(entry, duration, opened_at);
        assert!((at_open - 1.0).abs() < f32::EPSILON);

        let after = remaining_fraction(entry, duration, opened_at + Duration::from_secs(2));
        assert_eq!(after, 0.0);

        let halfway = remaining_fraction(entry, duration, opened_at + Duration::from_millis(750));
        assert!((halfway - 0.5).abs() < 0.01);
    }

    #[test]
    fn remaining_fraction_is_zero_for_closed_entries() {
        let mut registry = Registry::new();
        registry.register("trade-error", Definition::error("t", "d"));
        let entry = registry.get("trade-error").expect("registered");

        assert_eq!(
            remaining_fraction(entry, Duration::from_millis(1500), Instant::now()),
            0.0
        );
    }

    #[test]
    fn severity_glyphs_are_distinct() {
        let glyphs = [
            Severity::Info.glyph(),
            Severity::Success.glyph(),
            Severity::Warning.glyph(),
            Severity::Error.glyph(),
        ];
        for (i, a) in glyphs.iter().enumerate() {
            for b in glyphs.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
