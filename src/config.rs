//! Configuration read from environment variables at startup.
//!
//! | Variable               | Required | Purpose                                  |
//! |------------------------|----------|------------------------------------------|
//! | `SLACK_BOT_TOKEN`      | yes      | Posting and editing messages             |
//! | `SLACK_SIGNING_SECRET` | no       | Verifying inbound requests               |
//! | `FIGMA_TOKEN`          | yes      | Reading Figma files                      |
//! | `FIGMA_TEAM_ID`        | one of   | Scan every file the team owns            |
//! | `FIGMA_FILE_KEY`       | one of   | Read a single file                       |
//! | `PORT`                 | no       | Listening port, 80 by default            |
//!
//! Should both Figma identifiers be set, the team takes precedence.

use crate::{
    cardnews::selector::Scope,
    figma::auth::FigmaAccessToken,
    slack::auth::{SigningSecret, SlackAccessToken},
};
use std::fmt;

const DEFAULT_PORT: u16 = 80;

pub struct Config {
    pub slack_token: SlackAccessToken,
    pub signing_secret: Option<SigningSecret>,
    pub figma_token: FigmaAccessToken,
    pub scope: Scope,
    pub port: u16,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { var: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(var) => write!(f, "Missing ${} environment variable", var),
            ConfigError::Invalid { var, value } => {
                write!(f, "Invalid ${} environment variable: {}", var, value)
            }
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build a config from any source of variables. Empty values are treated
    /// as absent.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|x| !x.is_empty());
        let require = |var: &'static str| get(var).ok_or(ConfigError::Missing(var));

        let scope = match (get("FIGMA_TEAM_ID"), get("FIGMA_FILE_KEY")) {
            (Some(team_id), _) => Scope::Team { team_id },
            (None, Some(file_key)) => Scope::SingleFile { file_key },
            (None, None) => return Err(ConfigError::Missing("FIGMA_FILE_KEY")),
        };

        let port = match get("PORT") {
            Some(x) => x.parse().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                value: x,
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Config {
            slack_token: SlackAccessToken(require("SLACK_BOT_TOKEN")?),
            signing_secret: get("SLACK_SIGNING_SECRET").map(SigningSecret),
            figma_token: FigmaAccessToken(require("FIGMA_TOKEN")?),
            scope,
            port,
        })
    }
}
