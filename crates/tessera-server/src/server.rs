//! Development server implementation.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

use tessera_blocks::escape::escape_html;
use tessera_blocks::{Breakpoint, CompileError, Compiler, GeneratedCode, PreviewNode, PreviewRenderer};
use tessera_export::{bundle, download_file_name, BlockStore};
use tessera_model::{load_block_document, BlockConfigData, NewBlock, TemplateType};

use crate::watcher::{FileWatcher, WatchEvent};
use crate::websocket::{hmr_client_script, HmrHub, HmrMessage};

/// Configuration for the development server.
#[derive(Debug, Clone)]
pub struct DevServerConfig {
    /// Block document being edited
    pub block_file: PathBuf,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,

    /// Width class the live preview is rendered at
    pub viewport: Breakpoint,

    /// Entries kept by the compile cache
    pub cache_capacity: usize,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            block_file: PathBuf::from("block.yaml"),
            port: 7777,
            host: "127.0.0.1".to_string(),
            open: true,
            viewport: Breakpoint::Desktop,
            cache_capacity: 64,
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),

    #[error("File watch error: {0}")]
    WatchError(String),
}

/// The last successful compile of the edited document, plus the latest error.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub name: String,
    pub template: Option<TemplateType>,
    pub code: Option<GeneratedCode>,
    pub preview_html: Option<String>,
    pub error: Option<String>,
}

/// Shared server state.
pub struct ServerState {
    config: DevServerConfig,
    hmr: HmrHub,
    compiler: Compiler,
    preview: PreviewRenderer,
    store: Arc<dyn BlockStore>,
    snapshot: Snapshot,
}

pub type SharedState = Arc<RwLock<ServerState>>;

impl ServerState {
    pub fn new(config: DevServerConfig, store: Arc<dyn BlockStore>) -> Self {
        Self {
            compiler: Compiler::with_cache(config.cache_capacity),
            config,
            hmr: HmrHub::new(),
            preview: PreviewRenderer::new(),
            store,
            snapshot: Snapshot::default(),
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn hmr(&self) -> &HmrHub {
        &self.hmr
    }

    /// Reload and compile the block document.
    ///
    /// On failure the previous output is kept and only the error is updated.
    pub fn reload(&mut self) -> HmrMessage {
        match self.compile_file() {
            Ok((name, template, code, preview_html)) => {
                tracing::info!("Compiled {} ({})", name, template);
                let msg = HmrMessage::UpdateBlock {
                    name: name.clone(),
                    template: template.tag().to_string(),
                    html: code.html.clone(),
                    css: code.css.clone(),
                    preview_html: preview_html.clone(),
                };
                self.snapshot = Snapshot {
                    name,
                    template: Some(template),
                    code: Some(code),
                    preview_html: Some(preview_html),
                    error: None,
                };
                msg
            }
            Err(message) => {
                tracing::warn!("{}: {}", self.config.block_file.display(), message);
                self.snapshot.error = Some(message.clone());
                HmrMessage::CompileFailed { message }
            }
        }
    }

    /// Record that the edited document is gone, keeping the last good output.
    pub fn mark_deleted(&mut self) -> HmrMessage {
        let message = format!(
            "Block document deleted: {}",
            self.config.block_file.display()
        );
        tracing::warn!("{}", message);
        self.snapshot.error = Some(message.clone());
        HmrMessage::CompileFailed { message }
    }

    fn is_block_file(&self, path: &Path) -> bool {
        path.file_name() == self.config.block_file.file_name()
    }

    fn compile_file(&self) -> Result<(String, TemplateType, GeneratedCode, String), String> {
        let doc = load_block_document(&self.config.block_file).map_err(|e| e.to_string())?;
        let template: TemplateType = doc.template.parse().map_err(|e| format!("{e}"))?;

        let code = self
            .compiler
            .generate(&doc.config, template)
            .map_err(|e| e.to_string())?;
        let preview = self
            .preview
            .render(&doc.config, template, self.config.viewport)
            .map_err(|e| e.to_string())?;

        Ok((doc.name, template, code, preview.to_html()))
    }
}

/// Development server.
pub struct DevServer {
    config: DevServerConfig,
    store: Arc<dyn BlockStore>,
}

impl DevServer {
    pub fn new(config: DevServerConfig, store: Arc<dyn BlockStore>) -> Self {
        Self { config, store }
    }

    /// Start the development server.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|e| ServerError::InvalidAddress(format!("{}", e)))?;

        let mut initial = ServerState::new(self.config.clone(), self.store);
        initial.reload();
        let state = Arc::new(RwLock::new(initial));

        // Watch the containing directory so editors that replace the file are seen
        let watch_dir = self
            .config
            .block_file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        let (watcher, mut rx) =
            FileWatcher::new(&[watch_dir]).map_err(|e| ServerError::WatchError(e.to_string()))?;

        let state_clone = Arc::clone(&state);
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                handle_watch_event(&state_clone, event).await;
            }
            // Keep watcher alive
            drop(watcher);
        });

        let app = router(state);

        tracing::info!("Starting dev server at http://{}", addr);

        if self.config.open {
            let url = format!("http://{}", addr);
            let _ = open::that(&url);
        }

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        Ok(())
    }
}

/// All routes of the dev server.
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/download", get(download_handler))
        .route("/api/generate", post(generate_handler))
        .route("/api/preview", post(preview_handler))
        .route("/api/blocks", get(list_blocks_handler).post(create_block_handler))
        .route("/__hmr", get(ws_handler))
        .route("/__hmr.js", get(hmr_script_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Handle file watch events.
async fn handle_watch_event(state: &SharedState, event: WatchEvent) {
    let mut state = state.write().await;

    let msg = match event {
        WatchEvent::BlockModified(path) if state.is_block_file(&path) => {
            tracing::info!("Block document modified: {}", path.display());
            state.reload()
        }
        WatchEvent::BlockDeleted(path) if state.is_block_file(&path) => {
            state.mark_deleted()
        }
        _ => return,
    };

    state.hmr.send(msg);
}

/// JSON error body for API failures.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

fn compile_error_response(e: CompileError) -> Response {
    let status = match e {
        CompileError::UnknownTemplate(_) => StatusCode::BAD_REQUEST,
        CompileError::InvalidConfig { .. } => StatusCode::UNPROCESSABLE_ENTITY,
    };
    let body = ApiError {
        error: e.to_string(),
        path: e.path().map(str::to_string),
    };
    (status, Json(body)).into_response()
}

/// Body of `POST /api/generate`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub config: BlockConfigData,
    pub template_type: String,
}

/// Body of `POST /api/preview`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    #[serde(default)]
    pub config: BlockConfigData,
    pub template_type: String,
    #[serde(default = "default_viewport")]
    pub viewport: Breakpoint,
}

fn default_viewport() -> Breakpoint {
    Breakpoint::Desktop
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub html: String,
    pub tree: PreviewNode,
}

async fn generate_handler(
    State(state): State<SharedState>,
    Json(req): Json<GenerateRequest>,
) -> Response {
    let state = state.read().await;
    match state.compiler.generate_tag(&req.config, &req.template_type) {
        Ok(code) => Json(code).into_response(),
        Err(e) => compile_error_response(e),
    }
}

async fn preview_handler(
    State(state): State<SharedState>,
    Json(req): Json<PreviewRequest>,
) -> Response {
    let state = state.read().await;
    match state
        .preview
        .render_tag(&req.config, &req.template_type, req.viewport)
    {
        Ok(tree) => Json(PreviewResponse {
            html: tree.to_html(),
            tree,
        })
        .into_response(),
        Err(e) => compile_error_response(e),
    }
}

async fn list_blocks_handler(State(state): State<SharedState>) -> Response {
    let state = state.read().await;
    match state.store.list() {
        Ok(blocks) => Json(blocks).into_response(),
        Err(e) => store_error_response(e.to_string()),
    }
}

async fn create_block_handler(
    State(state): State<SharedState>,
    Json(block): Json<NewBlock>,
) -> Response {
    let state = state.read().await;
    match state.store.create(block) {
        Ok(saved) => (StatusCode::CREATED, Json(saved)).into_response(),
        Err(e) => store_error_response(e.to_string()),
    }
}

fn store_error_response(error: String) -> Response {
    tracing::warn!("Block store error: {}", error);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError { error, path: None }),
    )
        .into_response()
}

async fn download_handler(State(state): State<SharedState>) -> Response {
    let state = state.read().await;
    let snapshot = &state.snapshot;

    let Some(code) = &snapshot.code else {
        return (StatusCode::CONFLICT, "No compiled block yet").into_response();
    };

    (
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!(
                    "attachment; filename=\"{}\"",
                    download_file_name(&snapshot.name)
                ),
            ),
        ],
        bundle(code),
    )
        .into_response()
}

/// Handler for the configurator page.
async fn index_handler(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;
    Html(render_index(&state.snapshot, &state.config))
}

fn render_index(snapshot: &Snapshot, config: &DevServerConfig) -> String {
    let (html, css) = snapshot
        .code
        .as_ref()
        .map(|c| (c.html.as_str(), c.css.as_str()))
        .unwrap_or(("", ""));
    let error = snapshot.error.as_deref().unwrap_or("");
    let template = snapshot.template.map(|t| t.tag()).unwrap_or("");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Tessera Dev</title>
  <style>
    body {{ font-family: system-ui, sans-serif; margin: 0; background: #f4f5f7; color: #1d1f24; }}
    header {{ display: flex; gap: 1rem; align-items: baseline; padding: 1rem 2rem; background: #fff; border-bottom: 1px solid #dcdfe4; }}
    main {{ display: grid; grid-template-columns: 1fr 1fr; gap: 1rem; padding: 1rem 2rem; }}
    #preview {{ grid-column: 1 / -1; display: flex; justify-content: center; padding: 2rem; background: #e5e7eb; border-radius: 0.5rem; }}
    pre {{ background: #fff; padding: 1rem; border-radius: 0.5rem; overflow: auto; max-height: 24rem; }}
    #error {{ display: none; margin: 1rem 2rem 0; padding: 0.75rem 1rem; background: #fef2f2; color: #991b1b; border-radius: 0.5rem; }}
    body.has-error #error {{ display: block; }}
  </style>
</head>
<body class="{body_class}">
  <header>
    <strong id="block-name">{name}</strong>
    <code id="block-template">{template}</code>
    <small>{file} &middot; {viewport:?}</small>
    <button type="button" id="copy">Copy</button>
    <a href="/download">Download</a>
  </header>
  <div id="error">{error}</div>
  <main>
    <div id="preview">{preview}</div>
    <section><h2>HTML</h2><pre id="html-code">{html}</pre></section>
    <section><h2>CSS</h2><pre id="css-code">{css}</pre></section>
  </main>
  <script>
    document.getElementById('copy').addEventListener('click', async function() {{
      const res = await fetch('/download');
      if (res.ok) await navigator.clipboard.writeText(await res.text());
    }});
  </script>
  <script src="/__hmr.js"></script>
</body>
</html>"#,
        body_class = if error.is_empty() { "" } else { "has-error" },
        name = escape_html(&snapshot.name),
        template = template,
        file = escape_html(&config.block_file.display().to_string()),
        viewport = config.viewport,
        error = escape_html(error),
        preview = snapshot.preview_html.as_deref().unwrap_or(""),
        html = escape_html(html),
        css = escape_html(css),
    )
}

/// Handler for the HMR WebSocket endpoint.
async fn ws_handler(ws: WebSocketUpgrade, State(state): State<SharedState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

/// Handle a WebSocket connection.
async fn handle_ws(mut socket: WebSocket, state: SharedState) {
    let mut rx = {
        let state = state.read().await;
        state.hmr.subscribe()
    };

    if send_message(&mut socket, &HmrMessage::Connected).await.is_err() {
        return;
    }

    while let Ok(msg) = rx.recv().await {
        if send_message(&mut socket, &msg).await.is_err() {
            break;
        }
    }
}

async fn send_message(socket: &mut WebSocket, msg: &HmrMessage) -> Result<(), ()> {
    let json = serde_json::to_string(msg).map_err(|_| ())?;
    socket
        .send(Message::Text(json.into()))
        .await
        .map_err(|_| ())
}

/// Handler for the HMR client script.
async fn hmr_script_handler() -> impl IntoResponse {
    let script = hmr_client_script("/__hmr");
    ([(header::CONTENT_TYPE, "application/javascript")], script)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;
    use tessera_export::FileBlockStore;

    fn state_for(dir: &std::path::Path, doc: &str) -> ServerState {
        let block_file = dir.join("block.yaml");
        fs::write(&block_file, doc).unwrap();

        let store = FileBlockStore::open(dir.join("store")).unwrap();
        ServerState::new(
            DevServerConfig {
                block_file,
                open: false,
                ..Default::default()
            },
            Arc::new(store),
        )
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn creates_server_with_default_config() {
        let config = DevServerConfig::default();
        assert_eq!(config.port, 7777);
        assert_eq!(config.viewport, Breakpoint::Desktop);
    }

    #[test]
    fn reload_keeps_last_good_output() {
        let temp = tempdir().unwrap();
        let mut state = state_for(temp.path(), "name: Pro\ntemplate: pricing_card\n");

        let msg = state.reload();
        assert!(matches!(msg, HmrMessage::UpdateBlock { .. }));
        let good = state.snapshot().code.clone().unwrap();

        fs::write(temp.path().join("block.yaml"), "name: Pro\ntemplate: foo_bar\n").unwrap();
        let msg = state.reload();

        assert_eq!(
            msg,
            HmrMessage::CompileFailed {
                message: "Unknown template: foo_bar".to_string()
            }
        );
        assert_eq!(state.snapshot().code.as_ref(), Some(&good));
        assert!(state.snapshot().error.is_some());
    }

    #[tokio::test]
    async fn deleting_the_document_reports_an_error() {
        let temp = tempdir().unwrap();
        let mut initial = state_for(temp.path(), "name: Pro\ntemplate: pricing_card\n");
        initial.reload();
        let good = initial.snapshot().code.clone();
        let state = Arc::new(RwLock::new(initial));
        let mut rx = state.read().await.hmr().subscribe();

        fs::remove_file(temp.path().join("block.yaml")).unwrap();
        handle_watch_event(
            &state,
            WatchEvent::BlockDeleted(temp.path().join("other.yaml")),
        )
        .await;
        assert!(rx.try_recv().is_err());

        handle_watch_event(
            &state,
            WatchEvent::BlockDeleted(temp.path().join("block.yaml")),
        )
        .await;

        let msg = rx.try_recv().unwrap();
        assert!(matches!(
            msg,
            HmrMessage::CompileFailed { ref message } if message.starts_with("Block document deleted")
        ));
        let state = state.read().await;
        assert_eq!(state.snapshot().code, good);
        assert!(state.snapshot().error.is_some());
    }

    #[test]
    fn index_escapes_generated_code() {
        let temp = tempdir().unwrap();
        let mut state = state_for(temp.path(), "name: Hero\ntemplate: hero_section\n");
        state.reload();

        let page = render_index(state.snapshot(), &state.config);
        assert!(page.contains("id=\"html-code\">&lt;section"));
        assert!(page.contains("<div id=\"preview\"><section"));
    }

    #[tokio::test]
    async fn generate_endpoint_reports_errors() {
        let temp = tempdir().unwrap();
        let state = Arc::new(RwLock::new(state_for(temp.path(), "name: X\n")));

        let ok = generate_handler(
            State(Arc::clone(&state)),
            Json(GenerateRequest {
                config: BlockConfigData::default(),
                template_type: "cta_section".to_string(),
            }),
        )
        .await;
        assert_eq!(ok.status(), StatusCode::OK);
        let body = body_json(ok).await;
        assert!(body["html"].as_str().unwrap().contains("data-template=\"cta_section\""));

        let unknown = generate_handler(
            State(Arc::clone(&state)),
            Json(GenerateRequest {
                config: BlockConfigData::default(),
                template_type: "foo_bar".to_string(),
            }),
        )
        .await;
        assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);

        let mut config = BlockConfigData::default();
        config.title = String::new();
        let invalid = generate_handler(
            State(state),
            Json(GenerateRequest {
                config,
                template_type: "pricing_card".to_string(),
            }),
        )
        .await;
        assert_eq!(invalid.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(invalid).await["path"], "title");
    }

    #[tokio::test]
    async fn creates_and_lists_blocks() {
        let temp = tempdir().unwrap();
        let state = Arc::new(RwLock::new(state_for(temp.path(), "name: X\n")));

        let created = create_block_handler(
            State(Arc::clone(&state)),
            Json(NewBlock {
                name: "Saved".to_string(),
                template_type: TemplateType::Testimonial,
                config: BlockConfigData::default(),
                generated_html: None,
                generated_css: None,
            }),
        )
        .await;
        assert_eq!(created.status(), StatusCode::CREATED);
        assert_eq!(body_json(created).await["id"], 1);

        let listed = body_json(list_blocks_handler(State(state)).await).await;
        assert_eq!(listed[0]["name"], "Saved");
    }

    #[tokio::test]
    async fn download_requires_a_compiled_block() {
        let temp = tempdir().unwrap();
        let state = Arc::new(RwLock::new(state_for(
            temp.path(),
            "name: My Card\ntemplate: service_card\n",
        )));

        let empty = download_handler(State(Arc::clone(&state))).await;
        assert_eq!(empty.status(), StatusCode::CONFLICT);

        state.write().await.reload();
        let response = download_handler(State(state)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"my-card.html\""
        );
    }
}
