//! Contact book UI server - a single-page form over the contact book.

mod routes;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use contactbook::dispatch::open_session;
use contactbook::io::codec::FileFormat;
use contactbook::io::config::{DEFAULT_CONFIG_FILE, load_config};
use contactbook::logging;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::state::AppState;

#[derive(Parser)]
#[command(name = "contactbook-ui")]
#[command(about = "Web form for managing the contact book")]
struct Args {
    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1")]
    bind: String,

    /// Port to listen on
    #[arg(long, default_value = "3001")]
    port: u16,

    /// Config file (TOML)
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Contacts file, overriding the config
    #[arg(long)]
    file: Option<PathBuf>,

    /// Contacts file format, overriding the config
    #[arg(long, value_enum)]
    format: Option<FileFormat>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init(logging::UI_FILTER);

    let args = Args::parse();

    let config = load_config(&args.config)?.with_overrides(args.file, args.format);
    let (session, file) = open_session(&config)?;
    info!(
        path = %file.path.display(),
        format = file.format.codec().name(),
        contacts = session.book.len(),
        "starting contactbook-ui"
    );

    let state = AppState::new(session, file)?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::router()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
