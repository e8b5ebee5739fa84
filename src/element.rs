//! UI elements owned by a session.
//!
//! An element carries an `id`, the state the browser needs to render it and,
//! for interactive kinds, the Rust handler invoked when the user acts on it.
//! Geometry and styling live in the HTML layout, never here.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use serde::Serialize;

/// Shared, thread-safe event handler. Never serialized.
pub struct Handler<F: ?Sized>(Arc<F>);

impl<F: ?Sized> Clone for Handler<F> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<F: ?Sized> Deref for Handler<F> {
    type Target = F;

    fn deref(&self) -> &F {
        &self.0
    }
}

impl<F: ?Sized> fmt::Debug for Handler<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<handler>")
    }
}

pub type ClickHandler = Handler<dyn Fn() + Send + Sync + 'static>;
pub type TextHandler = Handler<dyn Fn(&str) + Send + Sync + 'static>;
pub type BoolHandler = Handler<dyn Fn(bool) + Send + Sync + 'static>;
pub type NumberHandler = Handler<dyn Fn(f64) + Send + Sync + 'static>;

pub fn on_click(f: impl Fn() + Send + Sync + 'static) -> Option<ClickHandler> {
    let f: Arc<dyn Fn() + Send + Sync> = Arc::new(f);
    Some(Handler(f))
}

pub fn on_text(f: impl Fn(&str) + Send + Sync + 'static) -> Option<TextHandler> {
    let f: Arc<dyn Fn(&str) + Send + Sync> = Arc::new(f);
    Some(Handler(f))
}

pub fn on_toggle(f: impl Fn(bool) + Send + Sync + 'static) -> Option<BoolHandler> {
    let f: Arc<dyn Fn(bool) + Send + Sync> = Arc::new(f);
    Some(Handler(f))
}

pub fn on_number(f: impl Fn(f64) + Send + Sync + 'static) -> Option<NumberHandler> {
    let f: Arc<dyn Fn(f64) + Send + Sync> = Arc::new(f);
    Some(Handler(f))
}

/// One entry of a [`UiElement::Select`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    /// `data-testid` of the rendered `<option>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_id: Option<String>,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            test_id: None,
        }
    }

    pub fn test_id(mut self, test_id: impl Into<String>) -> Self {
        self.test_id = Some(test_id.into());
        self
    }
}

/// Element kinds known to `webui.js`.
///
/// Each variant renders inside a `<ui-*>` host element carrying the same
/// `id`. Attributes on the host (`type`, `placeholder`, `disabled`,
/// `readonly`, `required`, `data-testid`, ...) are copied onto the native
/// control by the browser side.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum UiElement {
    /// `<ui-button>`: sends `click`.
    Button {
        id: String,
        text: String,
        disabled: bool,
        #[serde(skip)]
        on_click: Option<ClickHandler>,
    },

    /// `<ui-text>`: read-only text.
    Text { id: String, text: String },

    /// `<ui-input>`: single-line input, sends `input` on every keystroke.
    Input {
        id: String,
        value: String,
        #[serde(skip)]
        on_input: Option<TextHandler>,
    },

    /// `<ui-textarea>`: multi-line input, sends `input`.
    TextArea {
        id: String,
        value: String,
        #[serde(skip)]
        on_input: Option<TextHandler>,
    },

    /// `<ui-checkbox>`: sends `change` with a bool. Also used for switches.
    Checkbox {
        id: String,
        checked: bool,
        #[serde(skip)]
        on_change: Option<BoolHandler>,
    },

    /// `<ui-slider>`: range input, sends `change` with a number.
    Slider {
        id: String,
        value: f64,
        min: f64,
        max: f64,
        step: Option<f64>,
        #[serde(skip)]
        on_change: Option<NumberHandler>,
    },

    /// `<ui-radio>`: radios sharing `name` are mutually exclusive.
    Radio {
        id: String,
        name: String,
        value: String,
        checked: bool,
        #[serde(skip)]
        on_change: Option<BoolHandler>,
    },

    /// `<ui-select>`: dropdown, sends `change` with the option value. An
    /// empty `value` shows the placeholder.
    Select {
        id: String,
        value: String,
        options: Vec<SelectOption>,
        #[serde(skip)]
        on_change: Option<TextHandler>,
    },

    /// `<ui-progress>`: percentage bar, 0 to 100.
    Progress { id: String, value: f64 },

    /// `<ui-deck>`: shows the child whose `data-card` equals `active` and
    /// hides the others. An empty `active` hides every child.
    Deck { id: String, active: String },

    /// `<ui-markup>`: server-rendered HTML. Nested `<ui-*>` elements in the
    /// markup bind to their own registered state.
    Markup { id: String, html: String },
}

impl UiElement {
    pub fn id(&self) -> &str {
        match self {
            UiElement::Button { id, .. }
            | UiElement::Text { id, .. }
            | UiElement::Input { id, .. }
            | UiElement::TextArea { id, .. }
            | UiElement::Checkbox { id, .. }
            | UiElement::Slider { id, .. }
            | UiElement::Radio { id, .. }
            | UiElement::Select { id, .. }
            | UiElement::Progress { id, .. }
            | UiElement::Deck { id, .. }
            | UiElement::Markup { id, .. } => id,
        }
    }

    pub fn button(
        id: impl Into<String>,
        text: impl Into<String>,
        on_click: Option<ClickHandler>,
    ) -> Self {
        UiElement::Button {
            id: id.into(),
            text: text.into(),
            disabled: false,
            on_click,
        }
    }

    pub fn text(id: impl Into<String>, text: impl Into<String>) -> Self {
        UiElement::Text {
            id: id.into(),
            text: text.into(),
        }
    }

    pub fn markup(id: impl Into<String>, html: impl Into<String>) -> Self {
        UiElement::Markup {
            id: id.into(),
            html: html.into(),
        }
    }

    pub fn deck(id: impl Into<String>, active: impl Into<String>) -> Self {
        UiElement::Deck {
            id: id.into(),
            active: active.into(),
        }
    }
}
