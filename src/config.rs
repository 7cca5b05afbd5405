//! Configuration for the online catalog tools.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (WOLM_HOME, WOLM_CATALOG)
//! 2. Config file (.wolm/online-config.yaml)
//! 3. Defaults (~/.wolm)
//!
//! Config file discovery:
//! - Searches the current directory and its parents for .wolm/online-config.yaml
//! - Falls back to ~/.wolm/online-config.yaml
//! - Relative paths in the config file are resolved against its .wolm/ directory

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::util::ReportSink;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

const CONFIG_DIR: &str = ".wolm";
const CONFIG_FILE: &str = "online-config.yaml";
const DEFAULT_CATALOG_FILE: &str = "online.cache.json";
const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub http: Option<HttpConfig>,
    #[serde(default)]
    pub report: Option<ReportConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// Working directory for generated files
    pub home: Option<String>,
    /// Catalog JSON file
    pub catalog: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// silent, log, stderr, or stdout
    pub level: Option<String>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub home: PathBuf,
    /// Catalog file used when a command is not given one
    pub catalog: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    /// Timeout for audio-size lookups
    pub http_timeout: Duration,
    /// Where validation reports are mirrored
    pub report_sink: ReportSink,
}

/// Overrides read from the environment
#[derive(Debug, Clone, Default)]
struct EnvOverrides {
    home: Option<PathBuf>,
    catalog: Option<PathBuf>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            home: std::env::var("WOLM_HOME").ok().map(PathBuf::from),
            catalog: std::env::var("WOLM_CATALOG").ok().map(PathBuf::from),
        }
    }
}

/// Find config file by searching current directory and parents, then the home directory
fn find_config_file() -> Option<PathBuf> {
    if let Ok(mut current) = std::env::current_dir() {
        loop {
            let config_path = current.join(CONFIG_DIR).join(CONFIG_FILE);
            if config_path.exists() {
                return Some(config_path);
            }

            if !current.pop() {
                break;
            }
        }
    }

    let fallback = dirs::home_dir()?.join(CONFIG_DIR).join(CONFIG_FILE);
    fallback.exists().then_some(fallback)
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's directory
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Combine defaults, an optional config file, and environment overrides
fn resolve(
    default_home: PathBuf,
    config_file: Option<(PathBuf, ConfigFile)>,
    env: EnvOverrides,
) -> Result<ResolvedConfig> {
    let Some((config_path, config)) = config_file else {
        let home = env.home.unwrap_or(default_home);
        let catalog = env
            .catalog
            .unwrap_or_else(|| home.join(DEFAULT_CATALOG_FILE));

        return Ok(ResolvedConfig {
            home,
            catalog,
            config_file: None,
            http_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            report_sink: ReportSink::Stderr,
        });
    };

    let config_dir = config_path.parent().unwrap_or(Path::new(".")).to_path_buf();

    let home = if let Some(env_home) = env.home {
        env_home
    } else if let Some(ref home_path) = config.paths.home {
        resolve_path(&config_dir, home_path)
    } else {
        default_home
    };

    let catalog = if let Some(env_catalog) = env.catalog {
        env_catalog
    } else if let Some(ref catalog_path) = config.paths.catalog {
        resolve_path(&config_dir, catalog_path)
    } else {
        home.join(DEFAULT_CATALOG_FILE)
    };

    let timeout_seconds = config
        .http
        .as_ref()
        .and_then(|h| h.timeout_seconds)
        .unwrap_or(DEFAULT_TIMEOUT_SECONDS);

    let report_sink = match config.report.as_ref().and_then(|r| r.level.as_deref()) {
        Some(level) => level
            .parse()
            .with_context(|| format!("Invalid report level in {}", config_path.display()))?,
        None => ReportSink::Stderr,
    };

    Ok(ResolvedConfig {
        home,
        catalog,
        config_file: Some(config_path),
        http_timeout: Duration::from_secs(timeout_seconds),
        report_sink,
    })
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(CONFIG_DIR);

    let config_file = match find_config_file() {
        Some(path) => {
            let config = load_config_file(&path)?;
            Some((path, config))
        }
        None => None,
    };

    resolve(default_home, config_file, EnvOverrides::from_env())
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}

/// Get the default catalog file
pub fn catalog_path() -> Result<PathBuf> {
    Ok(config()?.catalog.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &Path, body: &str) -> PathBuf {
        let wolm_dir = dir.join(CONFIG_DIR);
        std::fs::create_dir_all(&wolm_dir).unwrap();

        let config_path = wolm_dir.join(CONFIG_FILE);
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "{}", body).unwrap();
        config_path
    }

    #[test]
    fn test_defaults_without_file() {
        let config =
            resolve(PathBuf::from("/users/me/.wolm"), None, EnvOverrides::default()).unwrap();

        assert_eq!(config.home, PathBuf::from("/users/me/.wolm"));
        assert_eq!(config.catalog, PathBuf::from("/users/me/.wolm/online.cache.json"));
        assert_eq!(config.http_timeout, Duration::from_secs(10));
        assert_eq!(config.report_sink, ReportSink::Stderr);
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_env_overrides_defaults() {
        let env = EnvOverrides {
            home: Some(PathBuf::from("/srv/wolm")),
            catalog: None,
        };
        let config = resolve(PathBuf::from("/users/me/.wolm"), None, env).unwrap();

        assert_eq!(config.home, PathBuf::from("/srv/wolm"));
        assert_eq!(config.catalog, PathBuf::from("/srv/wolm/online.cache.json"));
    }

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(
            temp.path(),
            r#"
version: "1.0"
paths:
  home: ./
  catalog: /data/catalog.json
http:
  timeout_seconds: 3
report:
  level: stdout
"#,
        );

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.paths.home, Some("./".to_string()));
        assert_eq!(config.paths.catalog, Some("/data/catalog.json".to_string()));
        assert_eq!(config.http.as_ref().and_then(|h| h.timeout_seconds), Some(3));

        let resolved = resolve(
            PathBuf::from("/users/me/.wolm"),
            Some((config_path, config)),
            EnvOverrides::default(),
        )
        .unwrap();
        assert_eq!(resolved.catalog, PathBuf::from("/data/catalog.json"));
        assert_eq!(resolved.http_timeout, Duration::from_secs(3));
        assert_eq!(resolved.report_sink, ReportSink::Stdout);
        assert!(resolved.config_file.is_some());
    }

    #[test]
    fn test_env_beats_config_file() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(
            temp.path(),
            "version: \"1.0\"\npaths:\n  catalog: catalog.json\n",
        );
        let config = load_config_file(&config_path).unwrap();

        let env = EnvOverrides {
            home: None,
            catalog: Some(PathBuf::from("/tmp/other.json")),
        };
        let resolved =
            resolve(PathBuf::from("/users/me/.wolm"), Some((config_path, config)), env).unwrap();

        assert_eq!(resolved.catalog, PathBuf::from("/tmp/other.json"));
        assert_eq!(resolved.home, PathBuf::from("/users/me/.wolm"));
    }

    #[test]
    fn test_invalid_report_level() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(
            temp.path(),
            "version: \"1.0\"\nreport:\n  level: loud\n",
        );
        let config = load_config_file(&config_path).unwrap();

        let result = resolve(
            PathBuf::from("/users/me/.wolm"),
            Some((config_path, config)),
            EnvOverrides::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_relative_path() {
        let base = PathBuf::from("/home/user/project");

        assert_eq!(
            resolve_path(&base, "./subdir"),
            PathBuf::from("/home/user/project/subdir")
        );
        assert_eq!(
            resolve_path(&base, "/absolute/path"),
            PathBuf::from("/absolute/path")
        );
    }
}
