//! Landing panel. Everything here is static apart from the call to action.

use crate::element::{UiElement, on_click};
use crate::sections::{Section, show_section};
use crate::state::AppState;

pub fn install(state: &AppState) {
    let state_for_btn = state.clone();
    state.add_element(UiElement::button(
        "get-started-btn",
        "Get Started with Form Elements",
        on_click(move || show_section(&state_for_btn, Section::Forms)),
    ));
}
