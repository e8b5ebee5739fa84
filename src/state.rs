//! Per-session element registry.
//!
//! An [`AppState`] holds every element of one browser session by id and
//! broadcasts changes to that session's socket. Handlers stored in the
//! registry usually capture a clone of the state, so [`AppState::close`] must
//! run when the socket goes away to release them.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;

use crate::element::UiElement;
use crate::protocol::{ServerMessage, ToastLevel};

const UPDATE_CAPACITY: usize = 100;

/// Element registry and outbound channel of one session.
///
/// Cheap to clone; all clones share the same registry.
#[derive(Clone)]
pub struct AppState {
    elements: Arc<Mutex<HashMap<String, UiElement>>>,
    update_tx: broadcast::Sender<ServerMessage>,
    closed: Arc<AtomicBool>,
}

impl AppState {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(UPDATE_CAPACITY);
        Self {
            elements: Arc::new(Mutex::new(HashMap::new())),
            update_tx: tx,
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    fn registry(&self) -> MutexGuard<'_, HashMap<String, UiElement>> {
        self.elements.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers an element, replacing any element with the same id.
    pub fn add_element(&self, element: UiElement) {
        self.registry().insert(element.id().to_string(), element);
    }

    /// Replaces an element and pushes it to the browser.
    pub fn update_element(&self, id: &str, element: UiElement) {
        self.registry().insert(id.to_string(), element.clone());
        self.send(ServerMessage::Update {
            id: id.to_string(),
            element,
        });
    }

    /// Edits a registered element in place and pushes the result. Handlers
    /// are kept. Returns `false` when `id` is unknown.
    pub fn modify_element(&self, id: &str, edit: impl FnOnce(&mut UiElement)) -> bool {
        let element = {
            let mut elements = self.registry();
            let Some(element) = elements.get_mut(id) else {
                tracing::debug!(id, "modify on unknown element");
                return false;
            };
            edit(element);
            element.clone()
        };
        self.send(ServerMessage::Update {
            id: id.to_string(),
            element,
        });
        true
    }

    /// Sets the text of a `Text` or the label of a `Button`.
    pub fn set_text(&self, id: &str, value: impl Into<String>) {
        let value = value.into();
        self.modify_element(id, |element| match element {
            UiElement::Text { text, .. } | UiElement::Button { text, .. } => *text = value,
            _ => {}
        });
    }

    /// Sets the value of an `Input`, `TextArea` or `Select`.
    pub fn set_value(&self, id: &str, new_value: impl Into<String>) {
        let new_value = new_value.into();
        self.modify_element(id, |element| match element {
            UiElement::Input { value, .. }
            | UiElement::TextArea { value, .. }
            | UiElement::Select { value, .. } => *value = new_value,
            _ => {}
        });
    }

    pub fn set_checked(&self, id: &str, state: bool) {
        self.modify_element(id, |element| match element {
            UiElement::Checkbox { checked, .. } | UiElement::Radio { checked, .. } => {
                *checked = state
            }
            _ => {}
        });
    }

    /// Sets the value of a `Slider` or `Progress`.
    pub fn set_number(&self, id: &str, number: f64) {
        self.modify_element(id, |element| match element {
            UiElement::Slider { value, .. } | UiElement::Progress { value, .. } => *value = number,
            _ => {}
        });
    }

    pub fn set_disabled(&self, id: &str, state: bool) {
        self.modify_element(id, |element| {
            if let UiElement::Button { disabled, .. } = element {
                *disabled = state;
            }
        });
    }

    /// Switches the visible card of a `Deck`.
    pub fn set_active(&self, id: &str, card: impl Into<String>) {
        let card = card.into();
        self.modify_element(id, |element| {
            if let UiElement::Deck { active, .. } = element {
                *active = card;
            }
        });
    }

    pub fn set_markup(&self, id: &str, markup: impl Into<String>) {
        let markup = markup.into();
        self.modify_element(id, |element| {
            if let UiElement::Markup { html, .. } = element {
                *html = markup;
            }
        });
    }

    /// Shows a toast in the browser.
    pub fn toast(&self, level: ToastLevel, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(?level, %message, "toast");
        self.send(ServerMessage::Toast { level, message });
    }

    pub fn get_element(&self, id: &str) -> Option<UiElement> {
        self.registry().get(id).cloned()
    }

    /// Gets all UI elements, for the `init` message.
    pub fn get_all_elements(&self) -> Vec<UiElement> {
        self.registry().values().cloned().collect()
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<ServerMessage> {
        self.update_tx.subscribe()
    }

    /// Whether the session's socket has gone away. Background tasks poll
    /// this to stop.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Ends the session: background tasks stop and the registry (with every
    /// handler in it) is dropped.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
        self.registry().clear();
    }

    fn send(&self, message: ServerMessage) {
        // No receiver just means no socket is attached yet.
        let _ = self.update_tx.send(message);
    }

    pub(crate) fn handle_click(&self, id: &str) {
        let handler = match self.registry().get(id) {
            Some(UiElement::Button {
                on_click: Some(handler),
                disabled: false,
                ..
            }) => Some(handler.clone()),
            _ => None,
        };
        if let Some(handler) = handler {
            handler();
        }
    }

    /// Records typed text and runs the element's handler. The browser already
    /// shows the text, so nothing is sent back.
    pub(crate) fn handle_input(&self, id: &str, text: &str) {
        let handler = match self.registry().get_mut(id) {
            Some(UiElement::Input { value, on_input, .. })
            | Some(UiElement::TextArea { value, on_input, .. }) => {
                *value = text.to_string();
                on_input.clone()
            }
            _ => None,
        };
        if let Some(handler) = handler {
            handler(text);
        }
    }

    pub(crate) fn handle_change(&self, id: &str, value: serde_json::Value) {
        enum HandlerCall {
            Bool(crate::element::BoolHandler, bool),
            Number(crate::element::NumberHandler, f64),
            Text(crate::element::TextHandler, String),
        }

        let handler_call = {
            let mut elements = self.registry();
            let group = match elements.get(id) {
                Some(UiElement::Radio { name, .. }) if value.as_bool() == Some(true) => {
                    Some(name.clone())
                }
                _ => None,
            };
            if let Some(group) = group {
                for element in elements.values_mut() {
                    if let UiElement::Radio { name, checked, .. } = element
                        && *name == group
                    {
                        *checked = false;
                    }
                }
            }

            match elements.get_mut(id) {
                Some(UiElement::Checkbox { checked, on_change, .. })
                | Some(UiElement::Radio { checked, on_change, .. }) => {
                    value.as_bool().and_then(|state| {
                        *checked = state;
                        on_change.clone().map(|handler| HandlerCall::Bool(handler, state))
                    })
                }
                Some(UiElement::Slider { value: current, on_change, .. }) => {
                    value.as_f64().and_then(|number| {
                        *current = number;
                        on_change.clone().map(|handler| HandlerCall::Number(handler, number))
                    })
                }
                Some(UiElement::Select { value: current, on_change, .. }) => {
                    value.as_str().and_then(|selected| {
                        *current = selected.to_string();
                        on_change
                            .clone()
                            .map(|handler| HandlerCall::Text(handler, selected.to_string()))
                    })
                }
                _ => None,
            }
        };

        match handler_call {
            Some(HandlerCall::Bool(handler, state)) => handler(state),
            Some(HandlerCall::Number(handler, number)) => handler(number),
            Some(HandlerCall::Text(handler, selected)) => handler(&selected),
            None => {}
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
