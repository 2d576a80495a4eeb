//! Development and preview servers.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::{IntoResponse, Redirect},
    routing::get,
    Router,
};
use tower_http::services::ServeDir;

use lectern_config::{ConfigError, LoadedSite};
use lectern_static::{BuildConfig, BuildError, BuildResult, StaticBuilder};

use crate::watcher::{FileWatcher, WatchEvent};
use crate::websocket::{
    reload_client_script, ReloadHub, ReloadMessage, RELOAD_SCRIPT_PATH, RELOAD_SOCKET_PATH,
};

/// Configuration for the development server.
#[derive(Debug, Clone)]
pub struct DevServerConfig {
    /// Site configuration file
    pub config_path: PathBuf,

    /// Directory the site is built into and served from
    pub output_dir: PathBuf,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from("lectern.toml"),
            output_dir: PathBuf::from(".lectern/dev"),
            port: 3000,
            host: "127.0.0.1".to_string(),
            open: true,
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid listen address {0}")]
    InvalidAddress(String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),

    #[error("File watch error: {0}")]
    WatchError(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("Build task failed: {0}")]
    Task(String),
}

/// Shared server state.
struct ServerState {
    hub: ReloadHub,
}

/// Development server: builds the site, serves the output and rebuilds on change.
pub struct DevServer {
    config: DevServerConfig,
}

impl DevServer {
    /// Create a new development server.
    pub fn new(config: DevServerConfig) -> Self {
        Self { config }
    }

    /// Build once, then serve and rebuild until the process is stopped.
    ///
    /// An invalid configuration at startup is fatal. Later build failures
    /// are logged and reported to the browser; the last good output stays
    /// in place.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr = listen_addr(&self.config.host, self.config.port)?;

        let site = LoadedSite::load(&self.config.config_path)?;
        let base_url = site.config.base_url.clone();
        let watch_paths = watch_paths(&site, &self.config.config_path);

        match rebuild(&self.config).await {
            Ok(result) => log_build(&result),
            Err(e) => tracing::error!("Initial build failed: {}", e),
        }

        let state = Arc::new(ServerState {
            hub: ReloadHub::new(),
        });

        // Events arrive with absolute paths
        let ignore = std::path::absolute(&self.config.output_dir).ok();
        let (watcher, mut rx) = FileWatcher::new(&watch_paths, ignore)
            .map_err(|e| ServerError::WatchError(e.to_string()))?;

        let config = self.config.clone();
        let state_clone = Arc::clone(&state);
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                // One rebuild covers everything queued so far
                let mut count = 1;
                while rx.try_recv().is_ok() {
                    count += 1;
                }
                handle_watch_event(&config, &state_clone, &event, count).await;
            }
            // Keep watcher alive
            drop(watcher);
        });

        let app = site_router(&self.config.output_dir, &base_url)
            .route(RELOAD_SOCKET_PATH, get(ws_handler))
            .route(RELOAD_SCRIPT_PATH, get(reload_script_handler))
            .with_state(state);

        let url = format!("http://{}{}", addr, base_url);
        tracing::info!("Starting dev server at {}", url);
        tracing::info!("Watching {} path(s) for changes", watch_paths.len());

        if self.config.open {
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

/// Serve an already built site without watching or rebuilding.
pub async fn serve_dir(
    dir: &Path,
    base_url: &str,
    host: &str,
    port: u16,
    open_browser: bool,
) -> Result<(), ServerError> {
    let addr = listen_addr(host, port)?;
    let app: Router = site_router(dir, base_url);

    let url = format!("http://{}{}", addr, base_url);
    tracing::info!("Serving {} at {}", dir.display(), url);

    if open_browser {
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

/// Load the configuration and build the site into the dev output directory.
///
/// The build is CPU bound, so it runs on the blocking pool.
pub async fn rebuild(config: &DevServerConfig) -> Result<BuildResult, ServerError> {
    let config_path = config.config_path.clone();
    let build_config = BuildConfig {
        output_dir: config.output_dir.clone(),
        minify: false,
        include_drafts: true,
        live_reload: Some(RELOAD_SCRIPT_PATH.to_string()),
    };

    tokio::task::spawn_blocking(move || -> Result<BuildResult, ServerError> {
        let site = LoadedSite::load(&config_path)?;
        let builder = StaticBuilder::new(site, build_config);
        let result = tokio::runtime::Handle::current().block_on(builder.build())?;
        Ok(result)
    })
    .await
    .map_err(|e| ServerError::Task(e.to_string()))?
}

/// Everything a rebuild reads: the configuration file, sidebar files,
/// content roots, pages, blog and static files.
pub fn watch_paths(site: &LoadedSite, config_path: &Path) -> Vec<PathBuf> {
    let mut paths = vec![config_path.to_path_buf()];

    for section in site.sections() {
        paths.push(section.content_path);
    }
    paths.extend(site.config_inputs());

    if let Some(blog) = site.config.blog() {
        paths.push(site.resolve(&blog.path));
    }
    paths.push(site.resolve(&site.config.pages_dir));
    paths.push(site.resolve(&site.config.static_dir));
    paths.extend(site.config.custom_css().into_iter().map(|css| site.resolve(css)));

    let mut unique = Vec::with_capacity(paths.len());
    for path in paths {
        if !unique.contains(&path) {
            unique.push(path);
        }
    }
    unique
}

/// Rebuild after a change and tell connected browsers.
async fn handle_watch_event(
    config: &DevServerConfig,
    state: &ServerState,
    event: &WatchEvent,
    count: usize,
) {
    match event {
        WatchEvent::Content(path) => tracing::info!("Content changed: {}", path.display()),
        WatchEvent::Config(path) => tracing::info!("Configuration changed: {}", path.display()),
        WatchEvent::Asset(path) => tracing::info!("File changed: {}", path.display()),
        WatchEvent::Removed(path) => tracing::info!("File removed: {}", path.display()),
    }
    if count > 1 {
        tracing::debug!(
            "{} more change(s) folded into the rebuild for {}",
            count - 1,
            event.path().display()
        );
    }

    match rebuild(config).await {
        Ok(result) => {
            log_build(&result);
            state.hub.send(ReloadMessage::Reload);
        }
        Err(e) => {
            tracing::error!("Rebuild failed: {}", e);
            state.hub.send(ReloadMessage::BuildFailed {
                message: e.to_string(),
            });
        }
    }
}

fn log_build(result: &BuildResult) {
    tracing::info!("{}", result.summary());
}

fn listen_addr(host: &str, port: u16) -> Result<SocketAddr, ServerError> {
    let addr = format!("{}:{}", host, port);
    addr.parse().map_err(|_| ServerError::InvalidAddress(addr))
}

/// Serve the output directory at the site's base URL.
fn site_router<S>(dir: &Path, base_url: &str) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let files = ServeDir::new(dir);
    let mount = base_url.trim_end_matches('/');

    if mount.is_empty() {
        Router::new().fallback_service(files)
    } else {
        let target = format!("{}/", mount);
        Router::new()
            .route(
                "/",
                get(move || {
                    let target = target.clone();
                    async move { Redirect::temporary(&target) }
                }),
            )
            .nest_service(mount, files)
    }
}

/// Handler for the live reload WebSocket endpoint.
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

/// Handle a WebSocket connection.
async fn handle_ws(mut socket: WebSocket, state: Arc<ServerState>) {
    let mut rx = state.hub.subscribe();

    if send_message(&mut socket, &ReloadMessage::Connected)
        .await
        .is_err()
    {
        return;
    }

    while let Ok(msg) = rx.recv().await {
        if send_message(&mut socket, &msg).await.is_err() {
            break;
        }
    }
}

async fn send_message(socket: &mut WebSocket, msg: &ReloadMessage) -> Result<(), ()> {
    let json = serde_json::to_string(msg).map_err(|_| ())?;
    socket
        .send(Message::Text(json.into()))
        .await
        .map_err(|_| ())
}

/// Handler for the live reload client script.
async fn reload_script_handler() -> impl IntoResponse {
    let script = reload_client_script(RELOAD_SOCKET_PATH);
    ([("content-type", "application/javascript")], script)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const CONFIG: &str = r#"
title = "Xceed"
url = "https://xceedsoftware.github.io"
base_url = "/"

[[presets]]
name = "classic"

[presets.docs]
sidebar_path = "sidebars.yaml"

[presets.blog]
"#;

    const SIDEBARS: &str = r#"
tutorialSidebar:
  - type: autogenerated
    dir: "."
"#;

    fn write_site(root: &Path) -> PathBuf {
        fs::create_dir_all(root.join("docs")).unwrap();
        fs::create_dir_all(root.join("blog")).unwrap();
        fs::write(root.join("docs/intro.md"), "# Intro\n\nWelcome.").unwrap();
        fs::write(
            root.join("blog/2024-01-01-hello.md"),
            "---\ntitle: Hello\n---\n\nFirst post.\n\n<!-- truncate -->\n\nMore.",
        )
        .unwrap();
        fs::write(root.join("sidebars.yaml"), SIDEBARS).unwrap();

        let config_path = root.join("lectern.toml");
        fs::write(&config_path, CONFIG).unwrap();
        config_path
    }

    #[test]
    fn creates_server_with_default_config() {
        let server = DevServer::new(DevServerConfig::default());
        assert_eq!(server.config.port, 3000);
        assert_eq!(server.config.config_path, PathBuf::from("lectern.toml"));
    }

    #[test]
    fn rejects_invalid_address() {
        let err = listen_addr("not a host", 3000).unwrap_err();
        assert!(matches!(err, ServerError::InvalidAddress(_)));
        assert!(listen_addr("0.0.0.0", 8080).is_ok());
    }

    #[test]
    fn watches_every_site_input() {
        let temp = tempdir().unwrap();
        let config_path = write_site(temp.path());
        let site = LoadedSite::load(&config_path).unwrap();

        let paths = watch_paths(&site, &config_path);

        assert_eq!(paths[0], config_path);
        assert!(paths.contains(&temp.path().join("docs")));
        assert!(paths.contains(&temp.path().join("sidebars.yaml")));
        assert!(paths.contains(&temp.path().join("blog")));
        assert!(paths.contains(&temp.path().join("static")));
        assert!(paths.contains(&temp.path().join("src/pages")));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn rebuild_injects_reload_script() {
        let temp = tempdir().unwrap();
        let config_path = write_site(temp.path());
        let config = DevServerConfig {
            config_path,
            output_dir: temp.path().join("out"),
            open: false,
            ..Default::default()
        };

        let result = rebuild(&config).await.unwrap();

        assert!(result.pages >= 2);
        let html = fs::read_to_string(temp.path().join("out/docs/intro/index.html")).unwrap();
        assert!(html.contains(r#"<script src="/__lectern/reload.js"></script>"#));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn rebuild_reports_invalid_config() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("lectern.toml");
        fs::write(&config_path, "title = [").unwrap();
        let config = DevServerConfig {
            config_path,
            output_dir: temp.path().join("out"),
            ..Default::default()
        };

        let err = rebuild(&config).await.unwrap_err();

        assert!(matches!(err, ServerError::Config(_)));
    }

    #[tokio::test]
    async fn serves_reload_script() {
        let response = reload_script_handler().await.into_response();
        assert_eq!(response.status(), axum::http::StatusCode::OK);
    }
}
