// SPDX-License-Identifier: MPL-2.0
//! Toast widget for rendering notifications.
//!
//! Toasts are small cards with a kind-colored accent, a glyph, the
//! resolved message and whatever controls the notification carries
//! (action, confirm/cancel, dismiss). Timed toasts show a thin bar with
//! the remaining lifetime.

use crate::config::TICK_INTERVAL_MS;
use crate::i18n::I18n;
use crate::notifications::{Kind, Message, Notification, NotificationStore, Outcome};
use crate::ui::design_tokens::{
    border, opacity, palette, radius, shadow, sizing, spacing, typography,
};
use iced::widget::{button, container, progress_bar, text, Column, Container, Row, Text};
use iced::{alignment, Color, Element, Length, Subscription, Theme};
use std::time::{Duration, Instant};

/// Toast widget configuration.
pub struct Toast;

impl Toast {
    /// Renders a single notification.
    pub fn view<'a>(
        notification: &'a Notification,
        now: Instant,
        i18n: &'a I18n,
    ) -> Element<'a, Message> {
        let kind = notification.kind();
        let accent_color = kind_color(kind);
        let id = notification.id();

        // Kind glyph, tinted with the accent
        let glyph = Text::new(kind.glyph())
            .size(sizing::ICON_MD)
            .style(move |_: &Theme| text::Style {
                color: Some(accent_color),
            });

        // Message text, resolved in the active locale
        let message = Text::new(notification.content().resolve(i18n))
            .size(typography::BODY)
            .style(|theme: &Theme| text::Style {
                color: Some(theme.palette().text),
            });

        // Dismiss button (always visible)
        let dismiss = button(text("×").size(typography::BODY))
            .on_press(Message::Dismiss(id))
            .padding(spacing::XXS)
            .style(ghost_button_style);

        // Layout: [glyph] [message] [dismiss]
        let header = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(Container::new(glyph).padding(spacing::XXS))
            .push(
                Container::new(message)
                    .width(Length::Fill)
                    .align_x(alignment::Horizontal::Left),
            )
            .push(dismiss);

        let mut body = Column::new().spacing(spacing::XS).push(header);

        // Optional controls row: [action] or [cancel] [confirm]
        let mut controls = Row::new()
            .spacing(spacing::XS)
            .align_y(alignment::Vertical::Center);
        let mut has_controls = false;

        if let Some(action) = notification.action() {
            controls = controls.push(
                button(text(action.label.resolve(i18n)).size(typography::BODY_SM))
                    .on_press(Message::InvokeAction(id))
                    .padding([spacing::XXS, spacing::XS])
                    .style(move |theme: &Theme, status| {
                        accent_button_style(theme, status, accent_color)
                    }),
            );
            has_controls = true;
        }

        // Confirm prompt buttons
        if let Some(token) = notification.decision() {
            controls = controls
                .push(
                    button(text(i18n.tr("notification-confirm-cancel")).size(typography::BODY_SM))
                        .on_press(Message::Resolve(token, Outcome::Cancel))
                        .padding([spacing::XXS, spacing::XS])
                        .style(ghost_button_style),
                )
                .push(
                    button(text(i18n.tr("notification-confirm-accept")).size(typography::BODY_SM))
                        .on_press(Message::Resolve(token, Outcome::Confirm))
                        .padding([spacing::XXS, spacing::XS])
                        .style(move |theme: &Theme, status| {
                            accent_button_style(theme, status, accent_color)
                        }),
                );
            has_controls = true;
        }

        if has_controls {
            body = body.push(
                Container::new(controls)
                    .width(Length::Fill)
                    .align_x(alignment::Horizontal::Right),
            );
        }

        if let Some(progress) = notification.progress(now) {
            // Drains as the toast ages.
            body = body.push(
                progress_bar(0.0..=1.0, progress)
                    .style(move |theme: &Theme| progress_style(theme, accent_color)),
            );
        }

        // Toast container with accent border
        Container::new(body)
            .width(Length::Fixed(sizing::TOAST_WIDTH))
            .padding(spacing::SM)
            .style(move |theme: &Theme| toast_container_style(theme, accent_color))
            .into()
    }

    /// Renders the newest notifications stacked in the bottom-right corner.
    pub fn view_overlay<'a>(
        store: &'a NotificationStore,
        i18n: &'a I18n,
        now: Instant,
    ) -> Element<'a, Message> {
        let toasts: Vec<Element<'a, Message>> = Self::visible(store)
            .map(|notification| Self::view(notification, now, i18n))
            .collect();

        if toasts.is_empty() {
            // Empty container that takes no space
            return Container::new(text(""))
                .width(Length::Shrink)
                .height(Length::Shrink)
                .into();
        }

        let column = Column::with_children(toasts)
            .spacing(spacing::XS)
            .align_x(alignment::Horizontal::Right);

        // Position in bottom-right with padding
        Container::new(column)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Right)
            .align_y(alignment::Vertical::Bottom)
            .padding(spacing::MD)
            .into()
    }

    /// The newest `max_visible` notifications, oldest of them first.
    pub fn visible(store: &NotificationStore) -> impl Iterator<Item = &Notification> {
        let hidden = store.len().saturating_sub(store.settings().max_visible);
        store.iter().skip(hidden)
    }

    /// Periodic tick that drives expiry and the progress bars.
    pub fn subscription() -> Subscription<Message> {
        iced::time::every(Duration::from_millis(TICK_INTERVAL_MS)).map(Message::Tick)
    }
}

/// Accent color for a notification kind.
#[must_use]
pub fn kind_color(kind: Kind) -> Color {
    match kind {
        Kind::Success => palette::SUCCESS_500,
        Kind::Error => palette::ERROR_500,
        Kind::Warning => palette::WARNING_500,
        Kind::Info => palette::INFO_500,
    }
}

fn toast_container_style(theme: &Theme, accent_color: Color) -> container::Style {
    let bg_color = theme.extended_palette().background.base.color;

    container::Style {
        background: Some(iced::Background::Color(bg_color)),
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

fn progress_style(theme: &Theme, accent_color: Color) -> progress_bar::Style {
    let track = theme.extended_palette().background.weak.color;

    progress_bar::Style {
        background: iced::Background::Color(track),
        bar: iced::Background::Color(accent_color),
        border: iced::Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
    }
}

fn accent_button_style(
    theme: &Theme,
    status: button::Status,
    accent_color: Color,
) -> button::Style {
    let alpha = match status {
        button::Status::Active => opacity::OPAQUE,
        button::Status::Hovered | button::Status::Pressed => 0.85,
        button::Status::Disabled => opacity::OVERLAY_MEDIUM,
    };

    button::Style {
        background: Some(iced::Background::Color(Color {
            a: alpha,
            ..accent_color
        })),
        text_color: theme.extended_palette().background.base.color,
        border: iced::Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

fn ghost_button_style(theme: &Theme, status: button::Status) -> button::Style {
    let base = theme.extended_palette().background.base;

    let background = match status {
        button::Status::Hovered => Some(opacity::OVERLAY_SUBTLE),
        button::Status::Pressed => Some(opacity::OVERLAY_MEDIUM),
        button::Status::Active | button::Status::Disabled => None,
    }
    .map(|a| iced::Background::Color(Color { a, ..palette::GRAY_400 }));

    let text_color = match status {
        button::Status::Disabled => Color {
            a: opacity::OVERLAY_MEDIUM,
            ..base.text
        },
        _ => base.text,
    };

    button::Style {
        background,
        text_color,
        border: iced::Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}
