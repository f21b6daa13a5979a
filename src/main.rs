//! application entry point

use crate::console::cli::Cli;
use crate::console::model::config::ClientConfig;
use anyhow::Context;
use clap::Parser;
use derive_more::Display;
use log::{info, warn};
use reqwest::Url;
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

mod console;

const API_BASE_PARSING_FAILED_MSG: &str = "failed to parse API_BASE_URL, aborting";
const DEFAULT_API_BASE_URL: &str = "http://localhost:3005";
const DEFAULT_STORAGE_PATH: &str = ".manager-storage.json";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), anyhow::Error> {
    // bootstrap
    // a. env
    let env = env::var("APP_ENV")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(Env::Dev); // default dev env if absent

    let dotenv = match env {
        Env::Prod | Env::Stg => Ok(()), // provided by the shell
        Env::Dev => dotenvy::from_path(Path::new(".env.dev")),
    };

    // b. logging
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    if let Err(e) = dotenv {
        warn!("failed to load envs from .env.dev, using process env only, {}", e);
    }

    // c. run command
    let config = ClientConfig::new(
        Url::parse(
            env::var("API_BASE_URL")
                .unwrap_or(DEFAULT_API_BASE_URL.to_string())
                .as_str(),
        )
        .context(API_BASE_PARSING_FAILED_MSG)?,
        PathBuf::from(env::var("STORAGE_PATH").unwrap_or(DEFAULT_STORAGE_PATH.to_string())),
    );
    let args = Cli::parse();

    info!("console is starting in env={}, api={}", env, config.api_base);

    console::run(config, args.command).await
}

#[derive(Debug, Display)]
#[non_exhaustive]
enum Env {
    Dev,
    Stg,
    Prod,
}

impl FromStr for Env {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dev" => Ok(Self::Dev),
            "stg" => Ok(Self::Stg),
            "prod" => Ok(Self::Prod),
            s => Err(format!("Invalid Env: {s}")),
        }
    }
}
