//! SheetLog Server Binary
//!
//! Starts the TCP server for SheetLog.

use clap::Parser;
use sheetlog::network::Server;
use sheetlog::{Config, Dispatcher, Engine, FileStore, Sheet, StoreBackend, TabularStore};
use tracing_subscriber::{fmt, EnvFilter};

/// SheetLog Server
#[derive(Parser, Debug)]
#[command(name = "sheetlog-server")]
#[command(about = "Request/reply CRUD service over a tabular store")]
#[command(version)]
struct Args {
    /// Data directory (holds the sheet snapshot)
    #[arg(short, long, default_value = "./sheetlog_data")]
    data_dir: String,

    /// Listen address (host:port)
    #[arg(short, long, default_value = "0.0.0.0:5555")]
    listen: String,

    /// Keep the sheet in memory only (nothing is written to disk)
    #[arg(long)]
    memory: bool,

    /// Largest accepted request payload in KB
    #[arg(long, default_value = "16384")]
    max_payload_kb: usize,

    /// Read timeout in milliseconds (0 disables)
    #[arg(long, default_value = "0")]
    read_timeout_ms: u64,

    /// Write timeout in milliseconds (0 disables)
    #[arg(long, default_value = "0")]
    write_timeout_ms: u64,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sheetlog=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    let backend = if args.memory {
        StoreBackend::Memory
    } else {
        StoreBackend::File
    };

    // Build config from args
    let config = Config::builder()
        .data_dir(&args.data_dir)
        .listen_addr(&args.listen)
        .store_backend(backend)
        .max_payload_size(args.max_payload_kb * 1024)
        .read_timeout_ms(args.read_timeout_ms)
        .write_timeout_ms(args.write_timeout_ms)
        .build();

    tracing::info!("SheetLog Server v{}", sheetlog::VERSION);
    tracing::info!("Store backend: {:?}", config.store_backend);
    if config.store_backend == StoreBackend::File {
        tracing::info!("Sheet snapshot: {}", config.sheet_path().display());
    }

    let store: Box<dyn TabularStore> = match config.store_backend {
        StoreBackend::Memory => Box::new(Sheet::new()),
        StoreBackend::File => match FileStore::open(&config.sheet_path()) {
            Ok(store) => Box::new(store),
            Err(e) => {
                tracing::error!("Failed to open sheet: {}", e);
                std::process::exit(1);
            }
        },
    };

    let engine = match Engine::open(store) {
        Ok(engine) => engine,
        Err(e) => {
            tracing::error!("Failed to prepare sheet: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Sheet ready");

    let mut server = match Server::bind(config, Dispatcher::new(engine)) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Failed to start server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
