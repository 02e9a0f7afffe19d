//! Compiler configuration

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{CompileError, CompileResult};

/// Environment variable pointing at a config file.
pub const CONFIG_ENV: &str = "TSQL_CRITERIA_CONFIG";

/// Dialect conventions the compiler fills in on the caller's behalf.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Schema used to qualify INSERT targets
    pub schema: String,

    /// Column captured from `INSERTED` after an insert
    pub primary_key: String,

    /// Name of the table variable holding the captured id
    pub capture_table: String,

    /// Type of the captured id column
    pub capture_type: String,

    /// Expression used when pagination needs an ORDER BY and none was given
    pub fallback_order_by: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            schema: "dbo".to_string(),
            primary_key: "id".to_string(),
            capture_table: "@Inserted".to_string(),
            capture_type: "NVARCHAR(255)".to_string(),
            fallback_order_by: "@@IDENTITY".to_string(),
        }
    }
}

impl CompilerConfig {
    /// Create a new configuration builder
    pub fn builder() -> CompilerConfigBuilder {
        CompilerConfigBuilder::default()
    }

    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> CompileResult<Self> {
        toml::from_str(content).map_err(|e| CompileError::Config(e.to_string()))
    }

    /// Read a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> CompileResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Default config location: `<config_dir>/tsql-criteria/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tsql-criteria").join("config.toml"))
    }

    /// Load from `$TSQL_CRITERIA_CONFIG`, then the default location, falling
    /// back to defaults when neither file exists.
    pub fn load() -> CompileResult<Self> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            tracing::debug!(path = %path, "loading compiler config from environment");
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => {
                tracing::debug!(path = %path.display(), "loading compiler config");
                Self::from_file(path)
            }
            _ => Ok(Self::default()),
        }
    }
}

/// Builder for CompilerConfig
#[derive(Debug, Default)]
pub struct CompilerConfigBuilder {
    config: CompilerConfig,
}

impl CompilerConfigBuilder {
    /// Set the insert schema
    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.config.schema = schema.into();
        self
    }

    /// Set the captured primary key column
    pub fn primary_key(mut self, column: impl Into<String>) -> Self {
        self.config.primary_key = column.into();
        self
    }

    /// Set the capture table variable and its id type
    pub fn capture(mut self, table: impl Into<String>, id_type: impl Into<String>) -> Self {
        self.config.capture_table = table.into();
        self.config.capture_type = id_type.into();
        self
    }

    /// Set the pagination fallback ordering
    pub fn fallback_order_by(mut self, expr: impl Into<String>) -> Self {
        self.config.fallback_order_by = expr.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> CompilerConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config =
            CompilerConfig::from_toml_str("schema = \"sales\"\nprimary_key = \"uid\"").unwrap();
        assert_eq!(config.schema, "sales");
        assert_eq!(config.primary_key, "uid");
        assert_eq!(config.fallback_order_by, "@@IDENTITY");
        assert_eq!(config.capture_table, "@Inserted");
    }

    #[test]
    fn test_bad_toml() {
        let err = CompilerConfig::from_toml_str("schema = [").unwrap_err();
        assert!(matches!(err, CompileError::Config(_)));
    }

    #[test]
    fn test_builder() {
        let config = CompilerConfig::builder()
            .schema("app")
            .capture("@Ids", "INT")
            .fallback_order_by("[id]")
            .build();
        assert_eq!(config.schema, "app");
        assert_eq!(config.capture_type, "INT");
        assert_eq!(config.fallback_order_by, "[id]");
        assert_eq!(config.primary_key, "id");
    }
}
