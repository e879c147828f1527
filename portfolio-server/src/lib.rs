use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use axum::http::StatusCode;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

pub mod config;
pub mod controllers;
pub mod error;
pub mod routes;
pub mod store;

use config::Config;
use store::MessageStore;

const MEMORY_URL: &str = "sqlite::memory:";

#[derive(Clone)]
pub struct AppState {
    /// Collezione dei messaggi di contatto; unico stato condiviso tra le richieste.
    pub store: MessageStore,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self { store: MessageStore::new(pool) }
    }
}

// Dato un percorso di file, restituisce un URL SQLite valido. Crea le directory genitrici se non esistono.
pub fn sqlite_url_for_path(p: &Path) -> anyhow::Result<String> {
    let abs = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };
    if let Some(parent) = abs.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create parent dirs for {:?}", parent))?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&abs)
        .with_context(|| format!("create/open sqlite file {:?}", abs))?;
    let s = abs.to_string_lossy().replace('\\', "/");
    // unix: "/tmp/x.db" -> sqlite:///tmp/x.db, windows: "C:/x.db" -> sqlite:///C:/x.db
    match s.strip_prefix('/') {
        Some(rest) => Ok(format!("sqlite:///{}", rest)),
        None => Ok(format!("sqlite:///{}", s)),
    }
}

/// Costruisce l'URL SQLite a partire dal valore di DATABASE_URL (già risolto in `Config`).
/// Accetta sia un percorso semplice che un URL "sqlite://...".
pub fn build_sqlite_url(raw: &str) -> anyhow::Result<String> {
    if raw == MEMORY_URL {
        return Ok(raw.to_string());
    }
    // Rimuovi il prefisso "sqlite://" se presente, per ottenere il percorso del file.
    let path_part = raw
        .strip_prefix("sqlite://")
        .or_else(|| raw.strip_prefix("sqlite:"))
        .unwrap_or(raw);
    sqlite_url_for_path(Path::new(path_part))
}

// Connect to the database and return a connection pool.
pub async fn connect_pool(db_url: &str) -> anyhow::Result<SqlitePool> {
    // ogni connessione in-memory è un database diverso: una sola connessione
    let max_connections = if db_url == MEMORY_URL { 1 } else { 8 };
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(db_url)
        .await
        .with_context(|| format!("connect to sqlite via {}", db_url))?;
    Ok(pool)
}

// Esegue le migrazioni del database. Crea la tabella dei messaggi se non esiste.
pub async fn run_migrations(pool: &SqlitePool) -> anyhow::Result<()> {
    // CHECK: i campi obbligatori restano non vuoti anche se la validazione venisse saltata
    let stmts = [
        r#"
        CREATE TABLE IF NOT EXISTS messages (
            message_id TEXT PRIMARY KEY,
            name       TEXT NOT NULL CHECK (length(name) > 0),
            email      TEXT NOT NULL CHECK (length(email) > 0),
            message    TEXT NOT NULL CHECK (length(message) > 0),
            created_at INTEGER NOT NULL
        );"#,
        r#"
        CREATE INDEX IF NOT EXISTS idx_messages_created_at
            ON messages (created_at DESC);"#,
    ];
    // applica ogni statement di migrazione
    for s in &stmts {
        sqlx::query(s)
            .execute(pool)
            .await
            .with_context(|| format!("apply migration: {}", s.trim().lines().next().unwrap_or_default()))?;
    }
    Ok(())
}

/// Controlla lo stato di salute del database tentando di acquisire una connessione dal pool.
pub async fn health_with_pool(pool: &SqlitePool) -> StatusCode {
    match pool.acquire().await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Avvia il servizio: database, migrazioni, router e ascolto fino a Ctrl+C / SIGTERM.
pub async fn start_server(config: Config) -> anyhow::Result<()> {
    let db_url = build_sqlite_url(&config.database_url).context("build sqlite DATABASE_URL")?;
    info!(%db_url, "Using database");

    let pool = connect_pool(&db_url).await.context("connect to sqlite")?;
    run_migrations(&pool).await.context("run migrations")?;
    info!("Connected to database");

    let state = Arc::new(AppState::new(pool.clone()));
    let app = routes::router(state, &config.static_dir);

    let addr: SocketAddr = config.bind_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind tcp listener on {addr}"))?;
    info!("Server running on port {}", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server shutdown")?;

    pool.close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = %e, "failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
