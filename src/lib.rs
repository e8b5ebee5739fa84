//! Test automation playground.
//!
//! A single page of uniquely identified widgets for practicing browser
//! automation: form controls, interactive components and a searchable,
//! sortable, paginated user table. All state and behavior live in Rust; the
//! page is plain HTML connected by a JSON protocol over WebSocket.
//!
//! # Architecture
//!
//! - **Rust layer**: [`UiElement`]s carry an id, the state the browser needs
//!   and the handlers for user events. No geometry or styling.
//! - **HTML layer**: custom elements (`<ui-button>`, `<ui-input>`,
//!   `<ui-deck>`, `<ui-markup>`, ...) placed and styled in the layout under
//!   `src/pages/`, implemented by `static/webui.js`.
//! - **Sessions**: every WebSocket connection builds a fresh [`AppState`], so
//!   reloading the page starts from the defaults.
//!
//! The user table is driven by a pure reducer ([`ViewState::reduce`]) and a
//! pure filter, sort and paginate pipeline ([`query::project`]).
//!
//! # Example
//!
//! ```no_run
//! use playground::{RouterConfig, UiElement, on_click, start_server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), playground::PlaygroundError> {
//!     let config = RouterConfig::new(
//!         |state| {
//!             let state_for_btn = state.clone();
//!             state.add_element(UiElement::button(
//!                 "btn1",
//!                 "Click Me!",
//!                 on_click(move || state_for_btn.set_text("status", "Clicked")),
//!             ));
//!             state.add_element(UiElement::text("status", "Ready"));
//!         },
//!         r#"<ui-button id="btn1"></ui-button> <ui-text id="status"></ui-text>"#,
//!     );
//!     start_server(config, "127.0.0.1:3000").await
//! }
//! ```

mod config;
mod element;
mod error;
mod protocol;
pub mod query;
pub mod sections;
mod server;
mod state;
pub mod users;
pub mod view_state;

pub use config::{Config, DEFAULT_LOG_LEVEL, LogFormat, init_logging};
pub use element::{
    BoolHandler, ClickHandler, Handler, NumberHandler, SelectOption, TextHandler, UiElement,
    on_click, on_number, on_text, on_toggle,
};
pub use error::{ParseOptionError, PlaygroundError};
pub use protocol::{ClientMessage, ServerMessage, ToastLevel};
pub use server::{RouterConfig, SessionSetup, create_router, start_server};
pub use state::AppState;
pub use view_state::{Action, ViewState};
