//! Form elements panel.
//!
//! Field values live in a [`FormData`] shared by the handlers. The disabled,
//! required and read-only showcase widgets are plain HTML and have no state.

use std::sync::{Arc, Mutex};

use crate::element::{SelectOption, TextHandler, UiElement, on_click, on_number, on_text, on_toggle};
use crate::protocol::ToastLevel;
use crate::sections::lock;
use crate::state::AppState;

const TEXT_FIELDS: [&str; 5] = [
    "name-input",
    "email-input",
    "password-input",
    "age-input",
    "bio-textarea",
];
const COUNTRY: &str = "country-select";
const NEWSLETTER: &str = "newsletter-checkbox";
const NOTIFICATIONS: &str = "notifications-switch";
const VOLUME: &str = "volume-slider";
const VOLUME_LABEL: &str = "volume-label";
const THEME_GROUP: &str = "theme";
const THEMES: [(&str, &str); 3] = [
    ("theme-light", "light"),
    ("theme-dark", "dark"),
    ("theme-auto", "auto"),
];
const COUNTRIES: [(&str, &str); 6] = [
    ("us", "United States"),
    ("uk", "United Kingdom"),
    ("ca", "Canada"),
    ("au", "Australia"),
    ("de", "Germany"),
    ("fr", "France"),
];
const DEFAULT_VOLUME: f64 = 50.0;

/// Current values of the basic and advanced form controls.
#[derive(Debug, Clone, PartialEq)]
pub struct FormData {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Raw text; the age field does no numeric validation.
    pub age: String,
    pub country: String,
    pub bio: String,
    pub newsletter: bool,
    pub theme: String,
    pub notifications: bool,
    pub volume: f64,
}

impl Default for FormData {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            password: String::new(),
            age: String::new(),
            country: String::new(),
            bio: String::new(),
            newsletter: false,
            theme: String::new(),
            notifications: false,
            volume: DEFAULT_VOLUME,
        }
    }
}

impl FormData {
    fn missing_required(&self) -> bool {
        [&self.name, &self.email, &self.password]
            .iter()
            .any(|value| value.trim().is_empty())
    }
}

fn volume_label(volume: f64) -> String {
    format!("Volume: {volume:.0}%")
}

fn text_field(form: &Arc<Mutex<FormData>>, apply: fn(&mut FormData, &str)) -> Option<TextHandler> {
    let form = form.clone();
    on_text(move |value| apply(&mut lock(&form), value))
}

pub fn install(state: &AppState) {
    let form = Arc::new(Mutex::new(FormData::default()));

    let setters: [fn(&mut FormData, &str); 5] = [
        |form, value| form.name = value.to_string(),
        |form, value| form.email = value.to_string(),
        |form, value| form.password = value.to_string(),
        |form, value| form.age = value.to_string(),
        |form, value| form.bio = value.to_string(),
    ];
    for (id, apply) in TEXT_FIELDS.into_iter().zip(setters) {
        let on_input = text_field(&form, apply);
        state.add_element(if id == "bio-textarea" {
            UiElement::TextArea {
                id: id.to_string(),
                value: String::new(),
                on_input,
            }
        } else {
            UiElement::Input {
                id: id.to_string(),
                value: String::new(),
                on_input,
            }
        });
    }

    state.add_element(UiElement::Select {
        id: COUNTRY.to_string(),
        value: String::new(),
        options: COUNTRIES
            .iter()
            .map(|(code, name)| SelectOption::new(*code, *name).test_id(format!("country-{code}")))
            .collect(),
        on_change: text_field(&form, |form, value| form.country = value.to_string()),
    });

    let form_for_newsletter = form.clone();
    state.add_element(UiElement::Checkbox {
        id: NEWSLETTER.to_string(),
        checked: false,
        on_change: on_toggle(move |checked| lock(&form_for_newsletter).newsletter = checked),
    });

    for (id, theme) in THEMES {
        let form_for_theme = form.clone();
        state.add_element(UiElement::Radio {
            id: id.to_string(),
            name: THEME_GROUP.to_string(),
            value: theme.to_string(),
            checked: false,
            on_change: on_toggle(move |checked| {
                if checked {
                    lock(&form_for_theme).theme = theme.to_string();
                }
            }),
        });
    }

    let form_for_switch = form.clone();
    state.add_element(UiElement::Checkbox {
        id: NOTIFICATIONS.to_string(),
        checked: false,
        on_change: on_toggle(move |checked| lock(&form_for_switch).notifications = checked),
    });

    state.add_element(UiElement::text(VOLUME_LABEL, volume_label(DEFAULT_VOLUME)));
    let form_for_volume = form.clone();
    let state_for_volume = state.clone();
    state.add_element(UiElement::Slider {
        id: VOLUME.to_string(),
        value: DEFAULT_VOLUME,
        min: 0.0,
        max: 100.0,
        step: Some(1.0),
        on_change: on_number(move |volume| {
            lock(&form_for_volume).volume = volume;
            state_for_volume.set_text(VOLUME_LABEL, volume_label(volume));
        }),
    });

    let form_for_submit = form.clone();
    let state_for_submit = state.clone();
    state.add_element(UiElement::button(
        "submit-btn",
        "Submit Form",
        on_click(move || submit(&state_for_submit, &lock(&form_for_submit))),
    ));

    let state_for_reset = state.clone();
    state.add_element(UiElement::button(
        "reset-btn",
        "Reset Form",
        on_click(move || {
            *lock(&form) = FormData::default();
            reset_widgets(&state_for_reset);
            state_for_reset.toast(ToastLevel::Info, "Form reset");
        }),
    ));
}

fn submit(state: &AppState, form: &FormData) {
    // Stands in for the browser's constraint validation on required fields.
    if form.missing_required() {
        state.toast(ToastLevel::Warning, "Please fill in all required fields");
        return;
    }
    tracing::info!(
        name = %form.name,
        email = %form.email,
        age = %form.age,
        country = %form.country,
        bio = %form.bio,
        newsletter = form.newsletter,
        theme = %form.theme,
        notifications = form.notifications,
        volume = form.volume,
        "form submitted"
    );
    state.toast(ToastLevel::Success, "Form submitted successfully!");
}

fn reset_widgets(state: &AppState) {
    for id in TEXT_FIELDS {
        state.set_value(id, "");
    }
    state.set_value(COUNTRY, "");
    state.set_checked(NEWSLETTER, false);
    state.set_checked(NOTIFICATIONS, false);
    for (id, _) in THEMES {
        state.set_checked(id, false);
    }
    state.set_number(VOLUME, DEFAULT_VOLUME);
    state.set_text(VOLUME_LABEL, volume_label(DEFAULT_VOLUME));
}
