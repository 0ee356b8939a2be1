//! inkvert HTTP server.
//!
//! Exposes the tracing service over two routes:
//!
//! - `POST /trace/bw` — two-tone line-art tracing ("logo" preset)
//! - `POST /trace/color` — layered posterized tracing ("posterize"
//!   preset)
//!
//! Both take a `multipart/form-data` body with a single `image` field
//! (PNG, JPEG or WEBP, at most 10 MiB) and answer with a JSON
//! envelope carrying the normalized SVG and processing metadata.

mod http;
mod multipart;
mod response;
mod validate;

use std::sync::Arc;

use clap::Parser;
use inkvert_trace::BuiltinEngine;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "inkvert-server", version, about = "Raster-to-SVG tracing service")]
struct Args {
    /// Address to bind.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 3000)]
    port: u16,

    /// Upload file size ceiling in bytes.
    #[arg(long, default_value_t = validate::MAX_UPLOAD_BYTES)]
    max_upload: usize,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_time()
        .build()?;
    let app = http::App {
        engine: Arc::new(BuiltinEngine),
        max_upload: args.max_upload,
    };
    http::serve(
        &format!("{}:{}", args.host, args.port),
        app,
        runtime.handle().clone(),
    )
}
