//! JSON messages exchanged with `webui.js` over the WebSocket.

use serde::{Deserialize, Serialize};

use crate::element::UiElement;

/// Messages from the browser.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientMessage {
    Click { id: String },
    Input { id: String, value: String },
    /// `value` is a bool for checkboxes and radios, a number for sliders and
    /// a string for selects.
    Change { id: String, value: serde_json::Value },
}

/// Messages to the browser.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerMessage {
    /// Full element registry, sent once when the socket opens.
    Init { elements: Vec<UiElement> },
    Update { id: String, element: UiElement },
    /// Short-lived notification in the toaster region.
    Toast { level: ToastLevel, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    Success,
    Error,
    Info,
    Warning,
}
