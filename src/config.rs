// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{DeployError, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub stack: StackConfig,
    pub provider: ProviderConfig,
    pub function: FunctionConfig,
    pub replication: ReplicationConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StackConfig {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    pub endpoint_url: String,
    pub region: String,
    pub access_key: String,
    pub secret_key: String,
    pub force_path_style: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FunctionConfig {
    pub name: String,
    pub handler: String,
    pub runtime: String,
    pub memory_mb: i32,
    pub timeout_secs: i32,
    pub code_path: PathBuf,
    pub layer_name: String,
    pub layer_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReplicationConfig {
    pub source_dir: PathBuf,
    pub bucket: String,
    pub key_prefix: String,
    #[serde(default)]
    pub include_pattern: Option<String>,
    #[serde(default)]
    pub exclude_pattern: Option<String>,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("STACKFORM")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| DeployError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| DeployError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            stack: StackConfig {
                name: "stackform.dev".to_string(),
            },
            provider: ProviderConfig {
                endpoint_url: "http://localhost:4566".to_string(),
                region: "us-west-2".to_string(),
                access_key: "test".to_string(),
                secret_key: "test".to_string(),
                force_path_style: true,
            },
            function: FunctionConfig {
                name: "upload".to_string(),
                handler: "lambda_function.lambda_handler".to_string(),
                runtime: "python3.12".to_string(),
                memory_mb: 512,
                timeout_secs: 15 * 60,
                code_path: PathBuf::from("./lambda/deploy.zip"),
                layer_name: "deps".to_string(),
                layer_path: PathBuf::from("./lambda/python.zip"),
            },
            replication: ReplicationConfig {
                source_dir: PathBuf::from("./site"),
                bucket: "stackform-site".to_string(),
                key_prefix: String::new(),
                include_pattern: None,
                exclude_pattern: None,
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.stack.name.trim().is_empty() {
            return Err(DeployError::Config("stack name must not be empty".to_string()));
        }

        if !self.provider.endpoint_url.starts_with("http://")
            && !self.provider.endpoint_url.starts_with("https://")
        {
            return Err(DeployError::Config(format!(
                "endpoint_url must be an http(s) URL: {}",
                self.provider.endpoint_url
            )));
        }

        if self.function.memory_mb <= 0 {
            return Err(DeployError::Config(
                "function memory_mb must be greater than 0".to_string(),
            ));
        }

        if self.function.timeout_secs <= 0 {
            return Err(DeployError::Config(
                "function timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl ReplicationConfig {
    /// Compile the configured include/exclude patterns into walk options.
    pub fn walk_options(&self) -> Result<crate::replicate::WalkOptions> {
        let compile = |pattern: &Option<String>, which: &str| -> Result<Option<regex::Regex>> {
            match pattern {
                Some(p) => regex::Regex::new(p)
                    .map(Some)
                    .map_err(|e| DeployError::Config(format!("invalid {which} pattern: {e}"))),
                None => Ok(None),
            }
        };

        Ok(crate::replicate::WalkOptions {
            include: compile(&self.include_pattern, "include")?,
            exclude: compile(&self.exclude_pattern, "exclude")?,
            ..crate::replicate::WalkOptions::new()
        })
    }
}

impl StackConfig {
    /// The environment is the last dot-separated segment of the stack name,
    /// e.g. `stackform.dev` runs in the `dev` environment.
    pub fn environment(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}
