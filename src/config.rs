//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use serde::Deserialize;

/// Table scanned when neither `TABLE_NAME` nor `NOME_DA_TABELA` is set.
pub const DEFAULT_TABLE_NAME: &str = "portfolio-metadata";

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `TABLE_NAME` (optional): backing DynamoDB table
/// - `NOME_DA_TABELA` (optional): legacy name of `TABLE_NAME`, used only when `TABLE_NAME` is unset
/// - `CORS_ALLOW_ORIGIN`, `CORS_ALLOW_METHODS`, `CORS_ALLOW_HEADERS` (optional): CORS response headers
/// - `DYNAMODB_ENDPOINT_URL` (optional): endpoint override, e.g. DynamoDB Local
/// - `SERVER_PORT` (optional): local HTTP server port, defaults to 3000
/// - `AWS_LAMBDA_RUNTIME_API` (set by Lambda): selects the Lambda runtime
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    table_name: Option<String>,

    #[serde(default)]
    nome_da_tabela: Option<String>,

    #[serde(default = "default_allow_origin")]
    pub cors_allow_origin: String,

    #[serde(default = "default_allow_methods")]
    pub cors_allow_methods: String,

    #[serde(default = "default_allow_headers")]
    pub cors_allow_headers: String,

    #[serde(default)]
    pub dynamodb_endpoint_url: Option<String>,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default)]
    aws_lambda_runtime_api: Option<String>,
}

fn default_allow_origin() -> String {
    "*".to_string()
}

fn default_allow_methods() -> String {
    "GET, OPTIONS".to_string()
}

fn default_allow_headers() -> String {
    "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token".to_string()
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable value cannot be parsed
    /// into the expected type (e.g. a non-numeric `SERVER_PORT`).
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();

        envy::from_env::<Config>()
    }

    /// Name of the table to scan.
    ///
    /// `TABLE_NAME` wins over `NOME_DA_TABELA`; blank values count as unset.
    pub fn table_name(&self) -> &str {
        [&self.table_name, &self.nome_da_tabela]
            .into_iter()
            .flatten()
            .map(|name| name.trim())
            .find(|name| !name.is_empty())
            .unwrap_or(DEFAULT_TABLE_NAME)
    }

    /// Whether the process was started by the Lambda service.
    pub fn runs_on_lambda(&self) -> bool {
        self.aws_lambda_runtime_api.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config, envy::Error> {
        envy::from_iter(
            vars.iter()
                .map(|(key, value)| (key.to_string(), value.to_string())),
        )
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = load(&[]).unwrap();

        assert_eq!(config.table_name(), "portfolio-metadata");
        assert_eq!(config.cors_allow_origin, "*");
        assert_eq!(config.cors_allow_methods, "GET, OPTIONS");
        assert_eq!(
            config.cors_allow_headers,
            "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token"
        );
        assert_eq!(config.server_port, 3000);
        assert!(config.dynamodb_endpoint_url.is_none());
        assert!(!config.runs_on_lambda());
    }

    #[test]
    fn legacy_table_variable_is_honored() {
        let config = load(&[("NOME_DA_TABELA", "projetos")]).unwrap();

        assert_eq!(config.table_name(), "projetos");
    }

    #[test]
    fn table_name_takes_precedence_over_legacy_variable() {
        let config = load(&[("TABLE_NAME", "projects"), ("NOME_DA_TABELA", "projetos")]).unwrap();

        assert_eq!(config.table_name(), "projects");
    }

    #[test]
    fn blank_table_name_falls_back() {
        let config = load(&[("TABLE_NAME", "  "), ("NOME_DA_TABELA", "projetos")]).unwrap();
        assert_eq!(config.table_name(), "projetos");

        let config = load(&[("TABLE_NAME", "")]).unwrap();
        assert_eq!(config.table_name(), DEFAULT_TABLE_NAME);
    }

    #[test]
    fn lambda_runtime_is_detected() {
        let config = load(&[("AWS_LAMBDA_RUNTIME_API", "127.0.0.1:9001")]).unwrap();

        assert!(config.runs_on_lambda());
    }

    #[test]
    fn invalid_port_is_rejected() {
        assert!(load(&[("SERVER_PORT", "eighty")]).is_err());
    }
}
