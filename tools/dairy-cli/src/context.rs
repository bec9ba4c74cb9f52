//! CLI execution context.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context as _, Result};
use dairy_client::{AuthContext, DairyApi};
use dairy_data::FetchClient;

use crate::config::CliConfig;
use crate::output::Output;

/// Config file names, in lookup order.
pub const CONFIG_NAMES: [&str; 3] = ["dairy.toml", ".dairy.toml", "dairy.json"];

/// Environment variable holding the bearer token.
pub const TOKEN_ENV: &str = "DAIRY_TOKEN";

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where the configuration was loaded from, if anywhere.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Token passed on the command line.
    token_flag: Option<String>,
}

impl Context {
    /// Load context from config file.
    pub fn load(
        config_path: Option<&str>,
        token_flag: Option<String>,
        output: Output,
    ) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = resolve_against(&cwd, path);
                (CliConfig::load(&path)?, Some(path))
            }
            None => match find_config(&cwd) {
                Some(path) => (CliConfig::load(&path)?, Some(path)),
                None => (CliConfig::default(), None),
            },
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
            token_flag,
        })
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        resolve_against(&self.cwd, path)
    }

    /// Session credentials: `--token`, then `DAIRY_TOKEN`, then the token file.
    pub fn auth(&self) -> Result<Option<AuthContext>> {
        let token = resolve_token(
            self.token_flag.as_deref(),
            std::env::var(TOKEN_ENV).ok(),
            self.config.session.token_file.as_deref().map(expand_home).as_deref(),
        )?;
        Ok(token.and_then(AuthContext::from_token))
    }

    /// Backend client with the configured base URL, timeout and session.
    pub fn api(&self) -> Result<DairyApi> {
        let mut client = FetchClient::new().with_base_url(&self.config.api.base_url);
        if let Some(secs) = self.config.api.timeout_secs {
            client = client
                .with_timeout(Duration::from_secs(secs))
                .context("Failed to build HTTP client")?;
        }

        let api = DairyApi::new(client);
        Ok(match self.auth()? {
            Some(auth) => api.with_auth(auth),
            None => api,
        })
    }

    /// Like [`Context::api`], but fails without a session token.
    pub fn authenticated_api(&self) -> Result<DairyApi> {
        let api = self.api()?;
        if !api.is_authenticated() {
            anyhow::bail!(
                "No session token. Pass --token, set {} or configure session.token_file",
                TOKEN_ENV
            );
        }
        Ok(api)
    }
}

/// Find a config file in `start` or any parent directory.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}

fn resolve_against(cwd: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), std::env::var_os("HOME")) {
        (Some(rest), Some(home)) => PathBuf::from(home).join(rest),
        _ => PathBuf::from(path),
    }
}

/// Pick the first non-blank token source.
fn resolve_token(
    flag: Option<&str>,
    env: Option<String>,
    token_file: Option<&Path>,
) -> Result<Option<String>> {
    let given = flag
        .map(str::to_string)
        .or(env)
        .filter(|t| !t.trim().is_empty());
    if given.is_some() {
        return Ok(given);
    }

    match token_file {
        Some(path) if path.exists() => {
            let token = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read token file: {}", path.display()))?;
            Ok(Some(token.trim().to_string()).filter(|t| !t.is_empty()))
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("dairy-cli-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_flag_beats_env() {
        let token = resolve_token(Some("flag"), Some("env".to_string()), None).unwrap();
        assert_eq!(token.as_deref(), Some("flag"));

        let token = resolve_token(None, Some("env".to_string()), None).unwrap();
        assert_eq!(token.as_deref(), Some("env"));
    }

    #[test]
    fn test_token_file_fallback() {
        let dir = temp_dir("token");
        let file = dir.join("token");
        std::fs::write(&file, "from-file\n").unwrap();

        let token = resolve_token(None, None, Some(&file)).unwrap();
        assert_eq!(token.as_deref(), Some("from-file"));

        let token = resolve_token(Some("  "), None, Some(&file)).unwrap();
        assert_eq!(token.as_deref(), Some("from-file"));

        let missing = dir.join("missing");
        assert_eq!(resolve_token(None, None, Some(&missing)).unwrap(), None);
    }

    #[test]
    fn test_find_config_walks_up() {
        let root = temp_dir("find");
        let nested = root.join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.join(".dairy.toml"), "").unwrap();

        assert_eq!(find_config(&nested), Some(root.join(".dairy.toml")));
    }

    #[test]
    fn test_resolve_against() {
        let cwd = Path::new("/work");
        assert_eq!(resolve_against(cwd, "draft.toml"), PathBuf::from("/work/draft.toml"));
        assert_eq!(resolve_against(cwd, "/abs.toml"), PathBuf::from("/abs.toml"));
    }
}
