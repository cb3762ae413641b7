//! Console construction from CLI flags and environment.

use std::fs;
use std::sync::Arc;

use thiserror::Error;

use scorta::infra::error::{ApiError, InfraError};
use scorta::{Console, Settings, StaticToken};

use crate::args::Cli;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("site URL is required (use --site or SCORTA_SITE_URL)")]
    MissingSite,
    #[error("api token is required (use --key-file or SCORTA_API_KEY)")]
    MissingKey,
    #[error("failed to read key file: {0}")]
    KeyFile(std::io::Error),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Setup(#[from] InfraError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

pub fn build_console(cli: &Cli) -> Result<Console, CliError> {
    let site = cli.site.clone().ok_or(CliError::MissingSite)?;
    let key = if let Some(path) = &cli.key_file {
        fs::read_to_string(path)
            .map_err(CliError::KeyFile)?
            .trim()
            .to_string()
    } else {
        cli.api_key_env.clone().ok_or(CliError::MissingKey)?
    };

    let mut settings = Settings::default();
    settings.api.base_url = site;
    if let Some(timeout) = cli.timeout {
        settings.api.request_timeout_secs = timeout;
    }

    Ok(Console::new(&settings, Arc::new(StaticToken::new(key)))?)
}
