use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::bail;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use scoutbook::auth::JwtConfig;
use scoutbook::config::{DEFAULT_CORS_ORIGIN, ServerConfig};
use scoutbook::server::{AppState, build_cors_layer, create_router};
use scoutbook::store::{SqliteStore, Store};

#[derive(Parser)]
#[command(name = "scoutbook")]
#[command(about = "A pitch-by-pitch baseball scouting server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database and seed the pitch type and result tables
    Init {
        /// Data directory for the database
        #[arg(long, default_value = "./data")]
        data_dir: String,
    },

    /// Start the server. Requires JWT_SECRET in the environment or a .env file.
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(long, short, default_value = "3001")]
        port: u16,

        /// Data directory for the database
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Browser origin allowed to call the API with credentials. Repeatable.
        #[arg(long = "cors-origin", default_value = DEFAULT_CORS_ORIGIN)]
        cors_origins: Vec<String>,
    },
}

fn run_init(data_dir: String) -> anyhow::Result<()> {
    let data_path: PathBuf = data_dir.into();
    fs::create_dir_all(&data_path)?;

    let db_path = data_path.join("scoutbook.db");
    let store = SqliteStore::new(&db_path)?;
    store.initialize()?;

    let types = store.list_pitch_types()?.len();
    let results = store.list_pitch_results()?.len();

    println!("Database ready at {}", db_path.display());
    println!("  {types} pitch types, {results} pitch results");

    Ok(())
}

async fn run_serve(config: ServerConfig) -> anyhow::Result<()> {
    let db_path = config.db_path();
    if !db_path.exists() {
        bail!("Server not initialized. Run 'scoutbook init' first to create the database.");
    }

    let store = SqliteStore::new(&db_path)?;
    // Picks up tables added since the database was created.
    store.initialize()?;

    let state = Arc::new(AppState::new(Arc::new(store), config.jwt.clone()));

    let app = create_router(state).layer(build_cors_layer(&config));
    let addr = config.socket_addr()?;

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("scoutbook=info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { data_dir } => run_init(data_dir)?,
        Commands::Serve {
            host,
            port,
            data_dir,
            cors_origins,
        } => {
            let jwt = JwtConfig::from_env()?;

            let config = ServerConfig {
                host,
                port,
                data_dir: data_dir.into(),
                cors_origins,
                jwt,
            };

            run_serve(config).await?;
        }
    }

    Ok(())
}
