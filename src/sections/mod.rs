//! The four panels of the playground and the navigation between them.
//!
//! Each panel contributes an HTML layout (under `src/pages/`) and an
//! `install` function registering its elements and handlers on a session.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::element::{UiElement, on_click};
use crate::server::RouterConfig;
use crate::state::AppState;

pub mod data;
pub mod forms;
pub mod interactive;
pub mod overview;

/// Deck holding the four panels.
pub const SECTIONS_DECK: &str = "main-sections";

pub const PAGE_TITLE: &str = "Test Automation Playground";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Overview,
    Forms,
    Interactive,
    Data,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Overview,
        Section::Forms,
        Section::Interactive,
        Section::Data,
    ];

    /// Card name in the sections deck; also the suffix of the nav id.
    pub fn key(self) -> &'static str {
        match self {
            Section::Overview => "overview",
            Section::Forms => "forms",
            Section::Interactive => "interactive",
            Section::Data => "data",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Section::Overview => "Overview",
            Section::Forms => "Form Elements",
            Section::Interactive => "Interactive Elements",
            Section::Data => "Data Display",
        }
    }
}

/// Registers every element of the playground on a fresh session.
pub fn install(state: &AppState) {
    install_navigation(state);
    overview::install(state);
    forms::install(state);
    interactive::install(state);
    data::install(state);
}

fn install_navigation(state: &AppState) {
    state.add_element(UiElement::deck(SECTIONS_DECK, Section::Overview.key()));
    for section in Section::ALL {
        let state_for_nav = state.clone();
        state.add_element(UiElement::button(
            format!("nav-{}", section.key()),
            section.label(),
            on_click(move || show_section(&state_for_nav, section)),
        ));
    }
}

pub fn show_section(state: &AppState, section: Section) {
    tracing::debug!(section = section.key(), "switching section");
    state.set_active(SECTIONS_DECK, section.key());
}

/// Full page layout: header plus the sections deck.
pub fn page_html() -> String {
    format!(
        r#"{header}
<main class="container">
<ui-deck id="{SECTIONS_DECK}">
{overview}
{forms}
{interactive}
{data}
</ui-deck>
</main>"#,
        header = include_str!("../pages/header.html"),
        overview = include_str!("../pages/overview.html"),
        forms = include_str!("../pages/forms.html"),
        interactive = include_str!("../pages/interactive.html"),
        data = include_str!("../pages/data.html"),
    )
}

/// Router configuration serving the playground.
pub fn router_config() -> RouterConfig {
    RouterConfig::new(install, page_html()).title(PAGE_TITLE)
}

/// Shows `card` in `deck`, or hides it if it is already showing.
pub(crate) fn toggle_card(state: &AppState, deck: &str, card: &str) {
    let showing = matches!(
        state.get_element(deck),
        Some(UiElement::Deck { active, .. }) if active == card
    );
    state.set_active(deck, if showing { "" } else { card });
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Escapes text for HTML element content and quoted attribute values.
pub(crate) fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
