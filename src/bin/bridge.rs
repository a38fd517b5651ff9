//! Stdio front end for [`fileutils::bridge`]. Logs go to stderr so stdout
//! carries nothing but responses.

use std::path::PathBuf;

use fileutils::{BackendRegistry, FileUtils, FileUtilsConfig};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = match std::env::var_os("FILEUTILS_CONFIG").map(PathBuf::from) {
        Some(path) => match FileUtilsConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => FileUtilsConfig::default(),
    };

    let plugin = FileUtils::new(BackendRegistry::with_local(), config);
    let stdin = BufReader::new(tokio::io::stdin());
    if let Err(e) = fileutils::bridge::serve(&plugin, stdin, tokio::io::stdout()).await {
        tracing::error!("Bridge stopped: {}", e);
        std::process::exit(1);
    }
}
