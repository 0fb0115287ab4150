use crate::cli::ConnectArgs;
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "lightbnb.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
        }
    }
}

fn default_max_connections() -> usize {
    lightbnb_db::pool::DEFAULT_MAX_SIZE
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// `tracing-subscriber` filter directive; `RUST_LOG` wins when set.
    #[serde(default = "default_level")]
    pub level: String,
    /// Log every statement through `TracedClient`.
    #[serde(default)]
    pub sql: bool,
    /// 0 disables truncation.
    #[serde(default = "default_max_sql_length")]
    pub max_sql_length: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            sql: false,
            max_sql_length: default_max_sql_length(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_max_sql_length() -> usize {
    200
}

/// Resolved settings for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: Option<String>,
    pub max_connections: usize,
    pub logging: LoggingConfig,
}

impl Settings {
    /// Read the config file (explicit, or the optional default) and apply the
    /// URL precedence: `--database`, then `database.url`, then `DATABASE_URL`.
    pub fn load(connect: &ConnectArgs) -> anyhow::Result<Self> {
        let _ = dotenvy::dotenv();

        let file = match &connect.config {
            Some(path) => ConfigFile::load(path)?,
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    ConfigFile::load(path)?
                } else {
                    ConfigFile::default()
                }
            }
        };

        let database_url = resolve_database_url(
            connect.database.as_deref(),
            file.database.url.as_deref(),
            std::env::var("DATABASE_URL").ok().as_deref(),
        );

        Ok(Self {
            database_url,
            max_connections: file.database.max_connections,
            logging: file.logging,
        })
    }

    pub fn require_database_url(&self) -> anyhow::Result<&str> {
        match self.database_url.as_deref() {
            Some(url) => Ok(url),
            None => anyhow::bail!(
                "no database URL: pass --database, set database.url in {DEFAULT_CONFIG_FILE}, or set DATABASE_URL"
            ),
        }
    }
}

impl ConfigFile {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;
        Self::parse(&raw)
            .map_err(|e| anyhow::anyhow!("failed to parse config file {}: {e:#}", path.display()))
    }

    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let mut file: ConfigFile = toml::from_str(raw)?;
        file.expand_env()?;
        file.validate()?;
        Ok(file)
    }

    fn expand_env(&mut self) -> anyhow::Result<()> {
        if let Some(url) = self.database.url.as_mut() {
            *url = expand_env_vars(url)?;
        }
        self.logging.level = expand_env_vars(&self.logging.level)?;
        Ok(())
    }

    fn validate(&self) -> anyhow::Result<()> {
        if let Some(url) = &self.database.url {
            if url.trim().is_empty() {
                anyhow::bail!("database.url must not be empty");
            }
        }
        if self.database.max_connections == 0 {
            anyhow::bail!("database.max_connections must be at least 1");
        }
        Ok(())
    }
}

/// First non-empty source wins.
pub fn resolve_database_url(
    flag: Option<&str>,
    config: Option<&str>,
    env: Option<&str>,
) -> Option<String> {
    [flag, config, env]
        .into_iter()
        .flatten()
        .find(|url| !url.trim().is_empty())
        .map(str::to_string)
}

/// Replace `${NAME}` with the value of environment variable `NAME`.
fn expand_env_vars(input: &str) -> anyhow::Result<String> {
    expand_with(input, |key| std::env::var(key).ok())
}

fn expand_with(input: &str, lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<String> {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '$' && chars.peek() == Some(&'{') {
            chars.next();

            let mut key = String::new();
            let mut closed = false;
            for ch in chars.by_ref() {
                if ch == '}' {
                    closed = true;
                    break;
                }
                key.push(ch);
            }

            if !closed {
                anyhow::bail!("unterminated env var reference: ${{{key}");
            }
            if key.is_empty() {
                anyhow::bail!("invalid env var reference: ${{}}");
            }

            let Some(v) = lookup(&key) else {
                anyhow::bail!("missing env var for config expansion: {key}");
            };
            out.push_str(&v);
        } else {
            out.push(c);
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn env(key: &str) -> Option<String> {
        match key {
            "PGHOST" => Some("db.internal".to_string()),
            "PGUSER" => Some("vagrant".to_string()),
            _ => None,
        }
    }

    #[test]
    fn expands_references() {
        let out = expand_with("postgres://${PGUSER}@${PGHOST}/lightbnb", env).unwrap();
        assert_eq!(out, "postgres://vagrant@db.internal/lightbnb");
        assert_eq!(expand_with("cost $5", env).unwrap(), "cost $5");
    }

    #[test]
    fn expansion_errors() {
        assert!(
            expand_with("${NOPE}", env)
                .unwrap_err()
                .to_string()
                .contains("NOPE")
        );
        assert!(expand_with("${PGHOST", env).is_err());
        assert!(expand_with("${}", env).is_err());
    }

    #[test]
    fn empty_file_uses_defaults() {
        let file = ConfigFile::parse("").unwrap();
        assert_eq!(file.database.url, None);
        assert_eq!(file.database.max_connections, 16);
        assert_eq!(file.logging.level, "info");
        assert!(!file.logging.sql);
        assert_eq!(file.logging.max_sql_length, 200);
    }

    #[test]
    fn parses_full_file() {
        let file = ConfigFile::parse(
            r#"
[database]
url = "postgres://localhost/lightbnb"
max_connections = 4

[logging]
level = "lightbnb=debug"
sql = true
max_sql_length = 0
"#,
        )
        .unwrap();
        assert_eq!(file.database.url.as_deref(), Some("postgres://localhost/lightbnb"));
        assert_eq!(file.database.max_connections, 4);
        assert_eq!(file.logging.level, "lightbnb=debug");
        assert!(file.logging.sql);
        assert_eq!(file.logging.max_sql_length, 0);
    }

    #[test]
    fn rejects_unknown_keys_and_bad_values() {
        assert!(ConfigFile::parse("[database]\nhost = \"x\"\n").is_err());
        assert!(ConfigFile::parse("[database]\nmax_connections = 0\n").is_err());
        assert!(ConfigFile::parse("[database]\nurl = \" \"\n").is_err());
    }

    #[test]
    fn url_precedence() {
        let pick = resolve_database_url;
        assert_eq!(pick(Some("flag"), Some("file"), Some("env")).as_deref(), Some("flag"));
        assert_eq!(pick(None, Some("file"), Some("env")).as_deref(), Some("file"));
        assert_eq!(pick(None, None, Some("env")).as_deref(), Some("env"));
        assert_eq!(pick(Some(""), None, Some("env")).as_deref(), Some("env"));
        assert_eq!(pick(None, None, None), None);
    }

    #[test]
    fn missing_url_names_every_source() {
        let settings = Settings {
            database_url: None,
            max_connections: 16,
            logging: LoggingConfig::default(),
        };
        let msg = settings.require_database_url().unwrap_err().to_string();
        assert!(msg.contains("--database"));
        assert!(msg.contains("lightbnb.toml"));
        assert!(msg.contains("DATABASE_URL"));
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let connect = ConnectArgs {
            config: Some(PathBuf::from("/nonexistent/lightbnb.toml")),
            database: None,
        };
        let err = Settings::load(&connect).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"), "{err}");
    }
}
