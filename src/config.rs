use anyhow::{Context, Result};
use std::path::PathBuf;

pub(crate) const BASE_URL_VAR: &str = "FINDASH_API_BASE_URL";
pub(crate) const LOG_VAR: &str = "FINDASH_LOG";
const API_URL_FLAG: &str = "--api-url";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) api_base_url: String,
    /// `env_logger` filter directives; each mode picks its own default.
    pub(crate) log_filter: Option<String>,
}

impl Config {
    /// Resolve from the process environment. Returns the remaining arguments
    /// with `--api-url <url>` stripped out.
    pub(crate) fn from_env(args: &[String]) -> Result<(Self, Vec<String>)> {
        Self::resolve(args, |key| std::env::var(key).ok())
    }

    pub(crate) fn resolve(
        args: &[String],
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<(Self, Vec<String>)> {
        let mut rest = Vec::with_capacity(args.len());
        let mut flag_url = None;
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            if arg == API_URL_FLAG {
                let value = iter
                    .next()
                    .with_context(|| format!("{API_URL_FLAG} needs a value"))?;
                flag_url = Some(value.clone());
            } else if let Some(value) = arg.strip_prefix("--api-url=") {
                flag_url = Some(value.to_string());
            } else {
                rest.push(arg.clone());
            }
        }

        let api_base_url = flag_url
            .or_else(|| env(BASE_URL_VAR))
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .with_context(|| {
                format!(
                    "No backend configured. Set {BASE_URL_VAR} (e.g. http://localhost:5000/api) or pass {API_URL_FLAG} <url>"
                )
            })?;

        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            anyhow::bail!("Backend URL must start with http:// or https://: {api_base_url}");
        }

        let log_filter = env(LOG_VAR).filter(|f| !f.trim().is_empty());

        Ok((
            Self {
                api_base_url,
                log_filter,
            },
            rest,
        ))
    }
}

/// Per-user data directory; holds the log file.
pub(crate) fn data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "findash", "FinDash")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.to_path_buf())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_base_url_from_env() {
        let env = |key: &str| (key == BASE_URL_VAR).then(|| "http://localhost:5000/api".to_string());
        let (config, rest) = Config::resolve(&args(&["findash"]), env).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:5000/api");
        assert_eq!(config.log_filter, None);
        assert_eq!(rest, args(&["findash"]));
    }

    #[test]
    fn test_flag_overrides_env() {
        let env = |key: &str| (key == BASE_URL_VAR).then(|| "http://env/api".to_string());
        let (config, rest) = Config::resolve(
            &args(&["findash", "--api-url", "https://flag/api", "summary"]),
            env,
        )
        .unwrap();
        assert_eq!(config.api_base_url, "https://flag/api");
        assert_eq!(rest, args(&["findash", "summary"]));
    }

    #[test]
    fn test_flag_with_equals() {
        let (config, rest) =
            Config::resolve(&args(&["findash", "list", "--api-url=http://x/api"]), no_env).unwrap();
        assert_eq!(config.api_base_url, "http://x/api");
        assert_eq!(rest, args(&["findash", "list"]));
    }

    #[test]
    fn test_missing_base_url_is_error() {
        let err = Config::resolve(&args(&["findash"]), no_env).unwrap_err();
        assert!(err.to_string().contains(BASE_URL_VAR));
    }

    #[test]
    fn test_blank_base_url_is_error() {
        let env = |key: &str| (key == BASE_URL_VAR).then(|| "  ".to_string());
        assert!(Config::resolve(&args(&["findash"]), env).is_err());
    }

    #[test]
    fn test_flag_without_value_is_error() {
        assert!(Config::resolve(&args(&["findash", "--api-url"]), no_env).is_err());
    }

    #[test]
    fn test_non_http_url_is_error() {
        let err = Config::resolve(&args(&["findash", "--api-url", "localhost:5000"]), no_env)
            .unwrap_err();
        assert!(err.to_string().contains("http://"));
    }

    #[test]
    fn test_log_filter_from_env() {
        let env = |key: &str| match key {
            BASE_URL_VAR => Some("http://x".to_string()),
            LOG_VAR => Some("debug".to_string()),
            _ => None,
        };
        let (config, _) = Config::resolve(&args(&["findash"]), env).unwrap();
        assert_eq!(config.log_filter.as_deref(), Some("debug"));
    }
}
