//! HTTP and WebSocket surface.
//!
//! - `/` serves the page layout wrapped in the HTML shell
//! - `/ws` upgrades to the UI protocol; every connection gets a fresh
//!   [`AppState`] built by the router's session setup
//! - `/static` serves `webui.js`, `webui.css` and anything else in the
//!   configured directory

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::{Html, IntoResponse},
    routing::get,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::error::PlaygroundError;
use crate::protocol::{ClientMessage, ServerMessage};
use crate::state::AppState;

/// Populates the registry of a new session.
pub type SessionSetup = Arc<dyn Fn(&AppState) + Send + Sync + 'static>;

/// Configuration for creating the router.
pub struct RouterConfig {
    /// Runs once per WebSocket connection on a fresh [`AppState`].
    pub setup: SessionSetup,
    /// Directory served under `/static`.
    pub static_dir: PathBuf,
    /// HTML page title.
    pub title: String,
    /// HTML body content (the UI layout).
    pub body_html: String,
}

impl RouterConfig {
    pub fn new(
        setup: impl Fn(&AppState) + Send + Sync + 'static,
        body_html: impl Into<String>,
    ) -> Self {
        Self {
            setup: Arc::new(setup),
            static_dir: PathBuf::from("static"),
            title: "Playground".to_string(),
            body_html: body_html.into(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = dir.into();
        self
    }
}

// Wraps the layout in the document shell. The toaster region is shared by
// every page.
fn generate_html(title: &str, body_content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="/static/webui.css">
</head>
<body>
{body_content}
    <div id="toaster" class="toaster" data-testid="toaster" aria-live="polite"></div>
    <script src="/static/webui.js"></script>
</body>
</html>"#
    )
}

async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(setup): State<SessionSetup>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| websocket(socket, setup))
}

fn encode(message: &ServerMessage) -> Option<Message> {
    match serde_json::to_string(message) {
        Ok(json) => Some(Message::Text(json.into())),
        Err(err) => {
            tracing::warn!(error = %err, "failed to encode server message");
            None
        }
    }
}

async fn websocket(stream: WebSocket, setup: SessionSetup) {
    let state = AppState::new();
    setup(&state);
    tracing::info!(elements = state.get_all_elements().len(), "session opened");

    let (mut sender, mut receiver) = stream.split();

    // Subscribe before sending init so no update falls in between.
    let mut update_rx = state.subscribe();

    let init_msg = ServerMessage::Init {
        elements: state.get_all_elements(),
    };
    let Some(init) = encode(&init_msg) else {
        state.close();
        return;
    };
    if sender.send(init).await.is_err() {
        state.close();
        return;
    }

    let mut send_task = tokio::spawn(async move {
        loop {
            match update_rx.recv().await {
                Ok(msg) => {
                    let Some(frame) = encode(&msg) else { continue };
                    if sender.send(frame).await.is_err() {
                        break;
                    }
                }
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "session lagged behind updates");
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let state_clone = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            let Message::Text(text) = msg else { continue };
            match serde_json::from_str::<ClientMessage>(text.as_str()) {
                Ok(client_msg) => {
                    tracing::debug!(?client_msg, "client message");
                    match client_msg {
                        ClientMessage::Click { id } => state_clone.handle_click(&id),
                        ClientMessage::Input { id, value } => {
                            state_clone.handle_input(&id, &value)
                        }
                        ClientMessage::Change { id, value } => {
                            state_clone.handle_change(&id, value)
                        }
                    }
                }
                Err(err) => tracing::debug!(error = %err, "dropping malformed client message"),
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    }

    state.close();
    tracing::info!("session closed");
}

/// Creates the axum router for the playground.
///
/// # Example
/// ```no_run
/// use playground::{RouterConfig, UiElement, create_router};
///
/// #[tokio::main]
/// async fn main() {
///     let config = RouterConfig::new(
///         |state| state.add_element(UiElement::text("status", "Ready")),
///         r#"<ui-text id="status"></ui-text>"#,
///     )
///     .title("My Page");
///
///     let app = create_router(config);
///     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await.unwrap();
///     axum::serve(listener, app).await.unwrap();
/// }
/// ```
pub fn create_router(config: RouterConfig) -> Router {
    let html_content = generate_html(&config.title, &config.body_html);

    Router::new()
        .route("/", get(move || async move { Html(html_content) }))
        .route("/ws", get(websocket_handler))
        .nest_service("/static", ServeDir::new(config.static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(config.setup)
}

/// Binds `addr` and serves `config` until the server fails.
pub async fn start_server(config: RouterConfig, addr: &str) -> Result<(), PlaygroundError> {
    let app = create_router(config);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| PlaygroundError::Bind {
            addr: addr.to_string(),
            source,
        })?;
    tracing::info!("Server running on http://{addr}");

    axum::serve(listener, app)
        .await
        .map_err(PlaygroundError::Serve)
}
