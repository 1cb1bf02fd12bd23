// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Office MCP and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Server settings resolved at startup: built-in defaults, then environment, then CLI flags.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::diagram::{KrokiConfig, KrokiRenderer, RenderError};
use crate::ops::Office;
use crate::store::DEFAULT_SESSION_TTL;
use crate::theme::{ThemeCatalog, ThemeError};

pub const ENV_DIAGRAM_ENDPOINT: &str = "OFFICE_MCP_DIAGRAM_ENDPOINT";
pub const ENV_SESSION_TTL_SECS: &str = "OFFICE_MCP_SESSION_TTL_SECS";
pub const ENV_THEMES: &str = "OFFICE_MCP_THEMES";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var}={value:?}: {reason}")]
    InvalidEnv {
        var: &'static str,
        value: String,
        reason: &'static str,
    },
    #[error("failed to load themes: {0}")]
    Themes(#[from] ThemeError),
    #[error("failed to set up diagram renderer: {0}")]
    Renderer(#[from] RenderError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub session_ttl: Duration,
    pub diagram: KrokiConfig,
    /// Theme catalogue file; the built-in table is used when unset.
    pub themes_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            session_ttl: DEFAULT_SESSION_TTL,
            diagram: KrokiConfig::default(),
            themes_path: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env(|var| std::env::var(var).ok())
    }

    /// Applies overrides from `lookup`; empty values count as unset.
    pub fn with_env(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());

        if let Some(endpoint) = get(ENV_DIAGRAM_ENDPOINT) {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(ConfigError::InvalidEnv {
                    var: ENV_DIAGRAM_ENDPOINT,
                    value: endpoint,
                    reason: "must be an http(s) URL",
                });
            }
            self.diagram.endpoint = endpoint;
        }
        if let Some(raw) = get(ENV_SESSION_TTL_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => self.session_ttl = Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        var: ENV_SESSION_TTL_SECS,
                        value: raw,
                        reason: "must be a positive number of seconds",
                    })
                }
            }
        }
        if let Some(path) = get(ENV_THEMES) {
            self.themes_path = Some(PathBuf::from(path));
        }
        Ok(self)
    }

    pub fn load_themes(&self) -> Result<ThemeCatalog, ThemeError> {
        match &self.themes_path {
            Some(path) => ThemeCatalog::from_path(path),
            None => ThemeCatalog::builtin(),
        }
    }

    /// Builds the session stores and their collaborators.
    pub fn build_office(&self) -> Result<Office, ConfigError> {
        let themes = self.load_themes()?;
        let renderer = KrokiRenderer::new(self.diagram.clone())?;
        Ok(Office::new(themes, Arc::new(renderer), self.session_ttl))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use super::{ConfigError, ServerConfig, ENV_DIAGRAM_ENDPOINT, ENV_SESSION_TTL_SECS, ENV_THEMES};

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn defaults_match_the_documented_values() {
        let config = ServerConfig::default();
        assert_eq!(config.session_ttl, Duration::from_secs(1800));
        assert_eq!(config.diagram.endpoint, "https://kroki.io/mermaid/png");
        assert_eq!(config.diagram.timeout, Duration::from_secs(15));
        assert_eq!(config.diagram.retry.max_retries, 2);
        assert_eq!(config.themes_path, None);
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = ServerConfig::default()
            .with_env(env(&[
                (ENV_DIAGRAM_ENDPOINT, "http://localhost:8000/mermaid/png"),
                (ENV_SESSION_TTL_SECS, "60"),
                (ENV_THEMES, "/etc/office/themes.json"),
            ]))
            .expect("valid env");

        assert_eq!(config.diagram.endpoint, "http://localhost:8000/mermaid/png");
        assert_eq!(config.session_ttl, Duration::from_secs(60));
        assert_eq!(
            config.themes_path.as_deref(),
            Some(std::path::Path::new("/etc/office/themes.json"))
        );
    }

    #[test]
    fn empty_values_are_ignored() {
        let config = ServerConfig::default()
            .with_env(env(&[(ENV_SESSION_TTL_SECS, "  ")]))
            .expect("valid env");
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn malformed_values_are_startup_errors() {
        for (var, value) in [
            (ENV_SESSION_TTL_SECS, "0"),
            (ENV_SESSION_TTL_SECS, "soon"),
            (ENV_DIAGRAM_ENDPOINT, "kroki.io"),
        ] {
            let err = ServerConfig::default()
                .with_env(env(&[(var, value)]))
                .unwrap_err();
            assert!(matches!(err, ConfigError::InvalidEnv { var: v, .. } if v == var));
        }
    }

    #[test]
    fn missing_theme_file_fails_to_load() {
        let config = ServerConfig {
            themes_path: Some("/definitely/not/here/themes.json".into()),
            ..ServerConfig::default()
        };
        assert!(config.load_themes().is_err());
    }
}
