//! Interactive elements panel: toasts, dialogs, tabs, accordion, progress
//! and dismissible notifications.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use crate::element::{UiElement, on_click};
use crate::protocol::ToastLevel;
use crate::sections::{escape, lock, toggle_card};
use crate::state::AppState;

const LOADING: &str = "loading-btn";
const LOADING_IDLE: &str = "Start Process";
const LOADING_BUSY: &str = "Processing...";
const LOADING_DELAY: Duration = Duration::from_secs(3);

const PROGRESS: &str = "progress-bar";
const PROGRESS_LABEL: &str = "progress-label";
const PROGRESS_TICK: Duration = Duration::from_millis(100);

const MODAL: &str = "modal";
const POPOVER: &str = "popover";
const TABS: &str = "main-tabs";
const ACCORDION: &str = "accordion";
const NOTIFICATIONS: &str = "notifications-list";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NotificationKind {
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    fn class(self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Warning => "warning",
            NotificationKind::Error => "error",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            NotificationKind::Success => "✓",
            NotificationKind::Warning => "!",
            NotificationKind::Error => "✕",
        }
    }
}

#[derive(Debug, Clone)]
struct Notification {
    id: u32,
    kind: NotificationKind,
    message: &'static str,
}

fn initial_notifications() -> Vec<Notification> {
    vec![
        Notification {
            id: 1,
            kind: NotificationKind::Success,
            message: "Profile updated successfully",
        },
        Notification {
            id: 2,
            kind: NotificationKind::Warning,
            message: "Storage space is running low",
        },
        Notification {
            id: 3,
            kind: NotificationKind::Error,
            message: "Failed to save changes",
        },
    ]
}

fn notifications_html(notifications: &[Notification]) -> String {
    notifications
        .iter()
        .map(|notification| {
            let id = notification.id;
            format!(
                r#"<div class="notification notification-{class}"
 id="notification-{id}" data-testid="notification-{id}">
  <span class="notification-icon">{icon}</span>
  <span class="notification-message">{message}</span>
  <ui-button id="dismiss-{id}" data-testid="dismiss-{id}"
   data-variant="ghost" aria-label="Dismiss"></ui-button>
</div>"#,
                class = notification.kind.class(),
                icon = notification.kind.icon(),
                message = escape(notification.message),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn progress_label(value: f64) -> String {
    format!("{value:.0}%")
}

fn set_progress(state: &AppState, value: f64) {
    state.set_number(PROGRESS, value);
    state.set_text(PROGRESS_LABEL, progress_label(value));
}

fn current_progress(state: &AppState) -> f64 {
    match state.get_element(PROGRESS) {
        Some(UiElement::Progress { value, .. }) => value,
        _ => 0.0,
    }
}

pub fn install(state: &AppState) {
    install_toast_buttons(state);
    install_loading_button(state);
    install_overlays(state);
    install_progress(state);
    install_notifications(state);
}

fn install_toast_buttons(state: &AppState) {
    let buttons = [
        ("save-btn", "Save Changes", ToastLevel::Success, "Save successful!"),
        ("delete-btn", "Delete Item", ToastLevel::Error, "Item deleted!"),
        ("download-btn", "Download File", ToastLevel::Info, "Download started"),
        ("success-toast", "Success Toast", ToastLevel::Success, "Success message!"),
        ("error-toast", "Error Toast", ToastLevel::Error, "Error message!"),
        ("info-toast", "Info Toast", ToastLevel::Info, "Info message!"),
        ("warning-toast", "Warning Toast", ToastLevel::Warning, "Warning message!"),
    ];
    for (id, text, level, message) in buttons {
        let state_for_btn = state.clone();
        state.add_element(UiElement::button(
            id,
            text,
            on_click(move || state_for_btn.toast(level, message)),
        ));
    }
}

fn install_loading_button(state: &AppState) {
    let state_for_btn = state.clone();
    state.add_element(UiElement::button(
        LOADING,
        LOADING_IDLE,
        on_click(move || {
            state_for_btn.set_disabled(LOADING, true);
            state_for_btn.set_text(LOADING, LOADING_BUSY);

            let state = state_for_btn.clone();
            tokio::spawn(async move {
                tokio::time::sleep(LOADING_DELAY).await;
                if state.is_closed() {
                    return;
                }
                state.set_disabled(LOADING, false);
                state.set_text(LOADING, LOADING_IDLE);
                state.toast(ToastLevel::Success, "Action completed!");
            });
        }),
    ));
}

// Modal, popover, tabs and accordion are decks toggled from Rust.
fn install_overlays(state: &AppState) {
    state.add_element(UiElement::deck(MODAL, ""));
    state.add_element(UiElement::deck(POPOVER, ""));
    state.add_element(UiElement::deck(TABS, "tab1"));
    state.add_element(UiElement::deck(ACCORDION, ""));

    let state_for_modal = state.clone();
    state.add_element(UiElement::button(
        "modal-trigger",
        "Open Modal",
        on_click(move || state_for_modal.set_active(MODAL, "open")),
    ));
    for (id, text) in [("modal-confirm", "Confirm Action"), ("modal-cancel", "Cancel")] {
        let state_for_btn = state.clone();
        state.add_element(UiElement::button(
            id,
            text,
            on_click(move || state_for_btn.set_active(MODAL, "")),
        ));
    }

    let state_for_popover = state.clone();
    state.add_element(UiElement::button(
        "popover-trigger",
        "Open Popover",
        on_click(move || toggle_card(&state_for_popover, POPOVER, "open")),
    ));

    for n in 1..=3 {
        let state_for_tab = state.clone();
        state.add_element(UiElement::button(
            format!("tab-{n}"),
            format!("Tab {n}"),
            on_click(move || state_for_tab.set_active(TABS, format!("tab{n}"))),
        ));
    }

    let sections = [
        "Section 1: Basic Information",
        "Section 2: Advanced Settings",
        "Section 3: Help & Support",
    ];
    for (n, title) in (1..).zip(sections) {
        let state_for_item = state.clone();
        state.add_element(UiElement::button(
            format!("accordion-trigger-{n}"),
            title,
            on_click(move || toggle_card(&state_for_item, ACCORDION, &format!("item-{n}"))),
        ));
    }
}

fn install_progress(state: &AppState) {
    state.add_element(UiElement::Progress {
        id: PROGRESS.to_string(),
        value: 0.0,
    });
    state.add_element(UiElement::text(PROGRESS_LABEL, progress_label(0.0)));

    for (id, text, value) in [
        ("reset-progress", "Reset Progress", 0.0),
        ("complete-progress", "Complete Progress", 100.0),
    ] {
        let state_for_btn = state.clone();
        state.add_element(UiElement::button(
            id,
            text,
            on_click(move || set_progress(&state_for_btn, value)),
        ));
    }

    let state = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(PROGRESS_TICK);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            if state.is_closed() {
                break;
            }
            let value = current_progress(&state);
            set_progress(&state, if value >= 100.0 { 0.0 } else { value + 1.0 });
        }
    });
}

fn install_notifications(state: &AppState) {
    let notifications = Arc::new(Mutex::new(initial_notifications()));
    state.add_element(UiElement::markup(
        NOTIFICATIONS,
        notifications_html(&lock(&notifications)),
    ));

    for notification in initial_notifications() {
        let id = notification.id;
        let notifications = notifications.clone();
        let state_for_btn = state.clone();
        state.add_element(UiElement::button(
            format!("dismiss-{id}"),
            "✕",
            on_click(move || {
                let html = {
                    let mut notifications = lock(&notifications);
                    notifications.retain(|notification| notification.id != id);
                    notifications_html(&notifications)
                };
                state_for_btn.set_markup(NOTIFICATIONS, html);
                state_for_btn.toast(ToastLevel::Info, "Notification dismissed");
            }),
        ));
    }
}
