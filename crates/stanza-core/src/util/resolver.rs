//! Config file location.
//!
//! `ConfigPathResolver` finds the configuration file for a project using, in
//! order: an explicit path, an environment variable, and the platform config
//! directory.
//!
//! # Example
//!
//! ```no_run
//! use stanza_core::util::resolver::ConfigPathResolver;
//!
//! let resolver = ConfigPathResolver::new("stanza");
//!
//! // Checks STANZA_CONFIG, then ~/.config/stanza/config.toml
//! if let Some(path) = resolver.resolve(None) {
//!     println!("Config: {:?}", path);
//! }
//! ```

use std::env;
use std::path::PathBuf;

/// Default config file name inside the project config directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Locates the config file for a specific project.
#[derive(Debug, Clone)]
pub struct ConfigPathResolver {
    /// Project name (e.g., "stanza")
    project_name: String,
    /// Environment variable prefix (e.g., "STANZA")
    env_prefix: String,
    /// File name within the project config directory
    file_name: String,
}

impl ConfigPathResolver {
    /// Create a new resolver for the given project name.
    ///
    /// The project name is converted to an environment variable prefix:
    /// - "stanza" → "STANZA"
    /// - "poetry-site" → "POETRY_SITE"
    pub fn new(project_name: &str) -> Self {
        let env_prefix = project_name.to_uppercase().replace(['-', ' '], "_");

        Self {
            project_name: project_name.to_string(),
            env_prefix,
            file_name: DEFAULT_CONFIG_FILE.to_string(),
        }
    }

    /// Override the config file name.
    pub fn with_file_name(mut self, file_name: &str) -> Self {
        self.file_name = file_name.to_string();
        self
    }

    /// Get the environment variable name for a given suffix.
    ///
    /// # Example
    /// ```
    /// use stanza_core::util::resolver::ConfigPathResolver;
    ///
    /// let resolver = ConfigPathResolver::new("stanza");
    /// assert_eq!(resolver.env_var("CONFIG"), "STANZA_CONFIG");
    /// ```
    pub fn env_var(&self, suffix: &str) -> String {
        format!("{}_{}", self.env_prefix, suffix)
    }

    /// The platform default location, e.g. `~/.config/stanza/config.toml`.
    pub fn default_path(&self) -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(&self.project_name).join(&self.file_name))
    }

    /// Resolve the config file path.
    ///
    /// Checks in order:
    /// 1. The explicit path, if given
    /// 2. `{PROJECT}_CONFIG` environment variable
    /// 3. The platform default location
    ///
    /// The returned path may not exist; callers decide whether a missing file
    /// means "use defaults" or is an error.
    pub fn resolve(&self, explicit: Option<&str>) -> Option<PathBuf> {
        let from_env = env::var(self.env_var("CONFIG")).ok();
        self.resolve_with(explicit, from_env.as_deref())
    }

    fn resolve_with(&self, explicit: Option<&str>, from_env: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit.filter(|p| !p.trim().is_empty()) {
            return Some(expand_tilde(path));
        }
        if let Some(path) = from_env.filter(|p| !p.trim().is_empty()) {
            log::debug!("Using config path from {}", self.env_var("CONFIG"));
            return Some(expand_tilde(path));
        }
        self.default_path()
    }

    /// Get the project name.
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Get the environment variable prefix.
    pub fn env_prefix(&self) -> &str {
        &self.env_prefix
    }
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
