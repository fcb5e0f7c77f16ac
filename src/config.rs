use anyhow::{Context, Result};
use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://localhost:8001";
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Runtime settings, read from the environment with CLI overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub log_filter: String,
    pub log_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env(api_url_override: Option<&str>) -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), api_url_override)
    }

    pub fn from_lookup<F>(lookup: F, api_url_override: Option<&str>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = api_url_override
            .map(str::to_string)
            .or_else(|| lookup("SKILLGAP_API_URL"))
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        reqwest::Url::parse(&api_url)
            .with_context(|| format!("Invalid analysis service URL: {}", api_url))?;

        Ok(Self {
            api_url,
            log_filter: lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            log_dir: lookup("SKILLGAP_LOG_DIR").map(PathBuf::from),
        })
    }

    pub fn log_path(&self) -> PathBuf {
        let dir = match &self.log_dir {
            Some(dir) => dir.clone(),
            None => directories::ProjectDirs::from("", "", "skillgap")
                .map(|dirs| dirs.data_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".")),
        };
        dir.join("skillgap.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[]), None).unwrap();
        assert_eq!(config.api_url, "http://localhost:8001");
        assert_eq!(config.log_filter, "info");
        assert!(config.log_dir.is_none());
        assert!(config.log_path().ends_with("skillgap.log"));
    }

    #[test]
    fn test_env_values() {
        let lookup = lookup_from(&[
            ("SKILLGAP_API_URL", "https://analyzer.example.com"),
            ("RUST_LOG", "skillgap=debug"),
            ("SKILLGAP_LOG_DIR", "/tmp/skillgap-logs"),
        ]);
        let config = Config::from_lookup(lookup, None).unwrap();
        assert_eq!(config.api_url, "https://analyzer.example.com");
        assert_eq!(config.log_filter, "skillgap=debug");
        assert_eq!(config.log_path(), PathBuf::from("/tmp/skillgap-logs/skillgap.log"));
    }

    #[test]
    fn test_flag_overrides_env() {
        let lookup = lookup_from(&[("SKILLGAP_API_URL", "https://analyzer.example.com")]);
        let config = Config::from_lookup(lookup, Some("http://10.0.0.5:9000")).unwrap();
        assert_eq!(config.api_url, "http://10.0.0.5:9000");
    }

    #[test]
    fn test_blank_env_falls_back_to_default() {
        let config = Config::from_lookup(lookup_from(&[("SKILLGAP_API_URL", "  ")]), None).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let result = Config::from_lookup(lookup_from(&[]), Some("not a url"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid analysis service URL"));
    }
}
