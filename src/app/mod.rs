// SPDX-License-Identifier: MPL-2.0
//! Demo dashboard that exercises every notification helper.
//!
//! The `App` owns the store, the diagnostics collector and the locale, and
//! forwards toast messages back into the store. Callbacks registered on
//! notifications cannot borrow the app, so they report back through a
//! channel that `update` drains after every message.

mod message;

pub use message::{DemoAction, Flags, Message};

use crate::config::{self, Config};
use crate::diagnostics::DiagnosticsCollector;
use crate::i18n::I18n;
use crate::notifications::{
    self, ConfirmCallbacks, Content, Kind, NotificationStore, NotifyOptions, Operation,
};
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::toast::Toast;
use crossbeam_channel::{Receiver, Sender};
use iced::widget::{button, text, Column, Row, Stack};
use iced::{Element, Length, Subscription, Task};
use std::fmt;
use std::path::Path;
use std::time::Instant;

pub const WINDOW_DEFAULT_WIDTH: f32 = 760.0;
pub const WINDOW_DEFAULT_HEIGHT: f32 = 560.0;

/// Outcome of a notification callback, handled on the next update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Followup {
    Undone,
    TechnicianDeleted,
    TechnicianKept,
}

/// Root application state.
pub struct App {
    pub i18n: I18n,
    store: NotificationStore,
    diagnostics: DiagnosticsCollector,
    followup_tx: Sender<Followup>,
    followup_rx: Receiver<Followup>,
    /// Last tick time; drives toast progress bars.
    now: Instant,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("locale", self.i18n.current_locale())
            .field("notifications", &self.store.len())
            .finish()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    let boot = move || App::new(flags.clone());

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .window_size(iced::Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT))
        .subscription(App::subscription)
        .run()
}

fn load_config(flags: &Flags) -> Config {
    let loaded = match flags.config_path.as_deref() {
        Some(path) => config::load_from_path(Path::new(path)),
        None => config::load(),
    };
    loaded.unwrap_or_else(|err| {
        eprintln!("Falling back to default settings: {err}");
        Config::default()
    })
}

impl App {
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let config = load_config(&flags);
        let i18n = I18n::new(flags.lang, &config);

        let diagnostics = DiagnosticsCollector::default();
        let mut store = NotificationStore::with_settings(config.notifications);
        store.set_diagnostics(diagnostics.handle());

        let (followup_tx, followup_rx) = crossbeam_channel::unbounded();

        let app = App {
            i18n,
            store,
            diagnostics,
            followup_tx,
            followup_rx,
            now: Instant::now(),
        };
        (app, Task::none())
    }

    fn title(&self) -> String {
        self.i18n.tr("demo-title")
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Notification(message) => {
                if let notifications::Message::Tick(now) = message {
                    self.now = now;
                }
                self.store.handle_message(&message);
            }
            Message::Demo(action) => {
                self.now = Instant::now();
                self.run_demo(action);
            }
            Message::CycleLocale => self.cycle_locale(),
        }

        self.drain_followups();
        self.diagnostics.process_pending();
        Task::none()
    }

    fn run_demo(&mut self, action: DemoAction) {
        match action {
            DemoAction::SaveWorkOrder => {
                let resource = self.i18n.tr("demo-resource-work-order");
                let tx = self.followup_tx.clone();
                self.store.show_success(
                    Content::localized(Operation::Save.i18n_key()).with_arg("resource", resource),
                    NotifyOptions::new().action(Content::localized("demo-action-undo"), move || {
                        let _ = tx.send(Followup::Undone);
                    }),
                );
            }
            DemoAction::FailRequest => {
                let body = serde_json::json!({
                    "response": { "data": { "message": "Technician schedule conflict" } }
                });
                self.store.show_http_error(&body, "Save");
            }
            DemoAction::LowStock => {
                self.store.show_warning(
                    Content::localized("demo-message-low-stock"),
                    NotifyOptions::new(),
                );
            }
            DemoAction::SyncStarted => {
                self.store
                    .show_info(Content::localized("demo-message-sync"), NotifyOptions::new());
            }
            DemoAction::PinnedReminder => {
                self.store.show_info(
                    Content::localized("demo-message-reminder"),
                    NotifyOptions::new().persistent(true),
                );
            }
            DemoAction::DeleteTechnician => {
                let on_confirm = self.followup_tx.clone();
                let on_cancel = self.followup_tx.clone();
                self.store.show_confirm(
                    Content::localized("demo-message-confirm"),
                    ConfirmCallbacks::new()
                        .on_confirm(move || {
                            let _ = on_confirm.send(Followup::TechnicianDeleted);
                        })
                        .on_cancel(move || {
                            let _ = on_cancel.send(Followup::TechnicianKept);
                        }),
                );
            }
            DemoAction::ClearErrors => {
                self.store.clear_by_kind(Kind::Error);
            }
            DemoAction::ClearAll => self.store.clear(),
        }
    }

    /// Moves to the next locale; toasts already on screen re-render in it.
    fn cycle_locale(&mut self) {
        let locales = &self.i18n.available_locales;
        let Some(pos) = locales
            .iter()
            .position(|locale| locale == self.i18n.current_locale())
        else {
            return;
        };
        if let Some(next) = locales.get((pos + 1) % locales.len()).cloned() {
            self.i18n.set_locale(next);
        }
    }

    fn drain_followups(&mut self) {
        while let Ok(followup) = self.followup_rx.try_recv() {
            match followup {
                Followup::Undone => {
                    self.store
                        .show_info(Content::localized("demo-message-undone"), NotifyOptions::new());
                }
                Followup::TechnicianDeleted => {
                    let resource = self.i18n.tr("demo-resource-technician");
                    self.store.show_operation_success("delete", &resource);
                }
                Followup::TechnicianKept => {
                    self.store
                        .show_info(Content::localized("demo-message-kept"), NotifyOptions::new());
                }
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let button_row = |actions: &[DemoAction]| {
            actions.iter().fold(Row::new().spacing(spacing::XS), |row, action| {
                row.push(
                    button(text(self.i18n.tr(action.label_key())).size(typography::BODY))
                        .on_press(Message::Demo(*action))
                        .padding(spacing::XS),
                )
            })
        };

        let (first, second) = DemoAction::ALL.split_at(4);
        let events = self.diagnostics.len().to_string();

        let dashboard = Column::new()
            .spacing(spacing::MD)
            .padding(spacing::LG)
            .push(
                Row::new()
                    .spacing(spacing::MD)
                    .push(text(self.i18n.tr("demo-title")).size(typography::TITLE_MD))
                    .push(
                        button(text(self.i18n.tr("demo-button-language")).size(typography::BODY))
                            .on_press(Message::CycleLocale)
                            .padding(spacing::XS),
                    ),
            )
            .push(button_row(first))
            .push(button_row(second))
            .push(
                text(
                    self.i18n
                        .tr_with_args("demo-diagnostics-count", &[("count", events.as_str())]),
                )
                .size(typography::BODY_SM),
            );

        let overlay =
            Toast::view_overlay(&self.store, &self.i18n, self.now).map(Message::Notification);

        Stack::new()
            .width(Length::Fill)
            .height(Length::Fill)
            .push(dashboard)
            .push(overlay)
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        // Nothing to expire or animate without timers.
        if self.store.pending_timers() == 0 {
            return Subscription::none();
        }
        Toast::subscription().map(Message::Notification)
    }
}
