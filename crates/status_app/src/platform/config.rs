use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context};
use clap::Parser;
use crossterm::tty::IsTty;
use log::LevelFilter;
use serde::Deserialize;
use status_core::DEFAULT_FAILURE_PROBABILITY;
use status_engine::ClientSettings;

use super::logging::LogDestination;

const DEFAULT_TOKEN_ENV: &str = "STATUS_API_TOKEN";

/// Terminal client for the mobile number status service.
#[derive(Parser, Debug, Default)]
#[command(author, version, about)]
pub struct Args {
    /// RON file with default settings; flags below override it
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Base URL of the status API, e.g. https://api.example.com/prod/
    #[arg(long, env = "STATUS_API_BASE_URL")]
    pub base_url: Option<String>,

    /// Environment variable holding the session's id token
    #[arg(long, value_name = "VAR")]
    pub token_env: Option<String>,

    /// Chance that a successful refresh is discarded as a simulated failure
    #[arg(long, value_name = "P")]
    pub failure_rate: Option<f64>,

    /// Seed for the simulated failure gate
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, value_name = "SECS")]
    pub connect_timeout_secs: Option<u64>,

    #[arg(long, value_name = "SECS")]
    pub request_timeout_secs: Option<u64>,

    #[arg(long, value_enum)]
    pub log: Option<LogDestination>,

    /// off, error, warn, info, debug or trace
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Disable ANSI colours; colour is only on by default when stdout is a terminal
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub token_env: Option<String>,
    pub failure_rate: Option<f64>,
    pub seed: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub log: Option<LogDestination>,
    pub log_level: Option<String>,
    pub color: Option<bool>,
}

impl FileConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(ron::from_str(text)?)
    }
}

/// Fully resolved settings for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub base_url: String,
    pub token_env: String,
    pub failure_rate: f64,
    pub seed: Option<u64>,
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
    pub log: LogDestination,
    pub log_level: LevelFilter,
    pub color: bool,
}

impl AppConfig {
    pub fn from_args(args: Args) -> anyhow::Result<Self> {
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::resolve(args, file, io::stdout().is_tty())
    }

    /// Command-line values win over file values. Colour defaults to `terminal`.
    pub fn resolve(args: Args, file: FileConfig, terminal: bool) -> anyhow::Result<Self> {
        let base_url = args
            .base_url
            .or(file.base_url)
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| anyhow!("no base URL: pass --base-url or set STATUS_API_BASE_URL"))?;

        let failure_rate = args
            .failure_rate
            .or(file.failure_rate)
            .unwrap_or(DEFAULT_FAILURE_PROBABILITY);
        if !(0.0..=1.0).contains(&failure_rate) {
            return Err(anyhow!("failure rate {failure_rate} is outside 0.0..=1.0"));
        }

        let log_level = match args.log_level.or(file.log_level) {
            Some(level) => LevelFilter::from_str(&level)
                .map_err(|_| anyhow!("unknown log level '{level}'"))?,
            None => LevelFilter::Info,
        };

        Ok(Self {
            base_url,
            token_env: args
                .token_env
                .or(file.token_env)
                .unwrap_or_else(|| DEFAULT_TOKEN_ENV.to_string()),
            failure_rate,
            seed: args.seed.or(file.seed),
            connect_timeout: args
                .connect_timeout_secs
                .or(file.connect_timeout_secs)
                .map(Duration::from_secs),
            request_timeout: args
                .request_timeout_secs
                .or(file.request_timeout_secs)
                .map(Duration::from_secs),
            log: args.log.or(file.log).unwrap_or_default(),
            log_level,
            color: !args.no_color && file.color.unwrap_or(terminal),
        })
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            connect_timeout: self.connect_timeout,
            request_timeout: self.request_timeout,
            ..ClientSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn args_with_url(url: &str) -> Args {
        Args {
            base_url: Some(url.to_string()),
            ..Args::default()
        }
    }

    #[test]
    fn defaults_apply_when_only_base_url_given() {
        let config =
            AppConfig::resolve(args_with_url("http://localhost"), FileConfig::default(), true)
                .unwrap();

        assert_eq!(config.token_env, "STATUS_API_TOKEN");
        assert_eq!(config.failure_rate, 0.1);
        assert_eq!(config.seed, None);
        assert_eq!(config.request_timeout, None);
        assert_eq!(config.log, LogDestination::File);
        assert_eq!(config.log_level, LevelFilter::Info);
        assert!(config.color);
    }

    #[test]
    fn missing_base_url_is_an_error() {
        let err = AppConfig::resolve(Args::default(), FileConfig::default(), true).unwrap_err();
        assert!(err.to_string().contains("base URL"));
    }

    #[test]
    fn flags_override_file_values() {
        let file = FileConfig::parse(
            r#"(
                base_url: Some("https://file.example.com/"),
                token_env: Some("FILE_TOKEN"),
                failure_rate: Some(0.5),
                seed: Some(9),
                request_timeout_secs: Some(30),
                log: Some(terminal),
                color: Some(false),
            )"#,
        )
        .unwrap();
        let args = Args {
            failure_rate: Some(0.0),
            ..args_with_url("https://flag.example.com/")
        };

        let config = AppConfig::resolve(args, file, true).unwrap();
        assert_eq!(config.base_url, "https://flag.example.com/");
        assert_eq!(config.token_env, "FILE_TOKEN");
        assert_eq!(config.failure_rate, 0.0);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.log, LogDestination::Terminal);
        assert!(!config.color);
    }

    #[test]
    fn out_of_range_failure_rate_is_rejected() {
        let args = Args {
            failure_rate: Some(1.5),
            ..args_with_url("http://localhost")
        };
        assert!(AppConfig::resolve(args, FileConfig::default(), true).is_err());
    }

    #[test]
    fn colour_is_off_when_stdout_is_not_a_terminal() {
        let piped =
            |args: Args, file: FileConfig| AppConfig::resolve(args, file, false).unwrap().color;
        assert!(!piped(args_with_url("http://localhost"), FileConfig::default()));

        let forced = FileConfig {
            color: Some(true),
            ..FileConfig::default()
        };
        assert!(piped(args_with_url("http://localhost"), forced.clone()));

        let args = Args {
            no_color: true,
            ..args_with_url("http://localhost")
        };
        assert!(!piped(args, forced));
    }

    #[test]
    fn unknown_file_fields_are_rejected() {
        assert!(FileConfig::parse("(colour_scheme: Some(1))").is_err());
    }

    #[test]
    fn loads_config_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"(base_url: Some("http://localhost:9000"), seed: Some(3))"#).unwrap();

        let args = Args {
            config: Some(file.path().to_path_buf()),
            ..Args::default()
        };
        let config = AppConfig::from_args(args).unwrap();
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.seed, Some(3));
    }
}
