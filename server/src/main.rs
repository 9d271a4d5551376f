use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::routing::post;
use axum::Router;
use clap::Parser;
use tower_http::services::ServeDir;

mod handlers;
mod state;
mod storage;
mod validation;

use crate::handlers::{create_signature, list_signatures};
use crate::state::AppState;
use crate::storage::load_entries;

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    #[arg(long)]
    entries_file: Option<PathBuf>,
    #[arg(long)]
    public_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let entries_file = args
        .entries_file
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../guestbook.bin"));
    if let Some(parent) = entries_file.parent() {
        if let Err(error) = tokio::fs::create_dir_all(parent).await {
            eprintln!("Failed to create entries dir: {error}");
        }
    }
    let entries = load_entries(&entries_file).await;
    println!("Loaded {} guestbook entries", entries.len());
    let state = AppState {
        entries: Arc::new(tokio::sync::RwLock::new(entries)),
        entries_file,
    };

    let public_dir = args
        .public_dir
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../public"));
    let app = Router::new()
        .route("/api/signatures", post(create_signature).get(list_signatures))
        .fallback_service(ServeDir::new(public_dir).append_index_html_on_directories(true))
        .with_state(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("Signbook running at http://localhost:{port}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind server");
    axum::serve(listener, app).await.expect("Server crashed");
}
