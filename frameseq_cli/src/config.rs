use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use frameseq_core::DirectoryListOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub listing: DirectoryListOptions,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct OutputConfig {
    pub default_format: String,
    pub color_enabled: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "text".to_string(),
            color_enabled: true,
        }
    }
}

const OUTPUT_FORMATS: &[&str] = &["text", "json", "csv"];

/// Configuration manager that handles XDG-compliant paths and layered configuration
pub struct ConfigManager {
    config_path: PathBuf,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// Create a new ConfigManager with default XDG-compliant paths
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a ConfigManager with a specific path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    fn default_config_path() -> PathBuf {
        #[cfg(not(target_os = "windows"))]
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
            && !xdg_config.is_empty()
        {
            return PathBuf::from(xdg_config).join("frameseq/config.toml");
        }

        #[cfg(target_os = "linux")]
        {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config/frameseq/config.toml")
        }

        #[cfg(target_os = "macos")]
        {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("Library/Application Support/frameseq/config.toml")
        }

        #[cfg(target_os = "windows")]
        {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("frameseq\\config.toml")
        }

        #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
        {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("frameseq/config.toml")
        }
    }

    /// Load configuration with layered priority: ENV > File > Defaults
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if self.config_path.exists() {
            figment = figment.merge(Toml::file(&self.config_path));
        }

        figment = figment.merge(Env::prefixed("FRAMESEQ_").split("__"));

        let config: AppConfig = figment.extract().context("Failed to load configuration")?;
        config
            .listing
            .validate()
            .context("Invalid [listing] configuration")?;
        Ok(config)
    }

    fn load_value(&self) -> Result<toml::Value> {
        let config = self.load()?;
        let toml_string = toml::to_string(&config)?;
        Ok(toml::from_str(&toml_string)?)
    }

    /// Get a configuration value by key (dot notation)
    pub fn get(&self, key: &str) -> Result<String> {
        let value = self.load_value()?;

        let mut current = &value;
        for part in key.split('.') {
            match current {
                toml::Value::Table(table) => {
                    current = table
                        .get(part)
                        .ok_or_else(|| anyhow::anyhow!("Key '{}' not found", key))?;
                }
                _ => anyhow::bail!("Invalid key path: {}", key),
            }
        }

        render_value(current).ok_or_else(|| anyhow::anyhow!("Value at '{}' is not a simple type", key))
    }

    /// Set a configuration value by key (dot notation) and persist it
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parsed_value = parse_config_value(key, value)?;

        let mut config = if self.config_path.exists() {
            let content = fs::read_to_string(&self.config_path)
                .with_context(|| format!("Failed to read {}", self.config_path.display()))?;
            toml::from_str(&content)?
        } else {
            toml::Value::Table(toml::map::Map::new())
        };

        let parts: Vec<&str> = key.split('.').collect();
        let Some((last, sections)) = parts.split_last() else {
            anyhow::bail!("Empty key");
        };
        if last.is_empty() {
            anyhow::bail!("Empty key");
        }

        let mut current = &mut config;
        for part in sections {
            let toml::Value::Table(table) = current else {
                anyhow::bail!("Invalid key path: expected table at '{}'", part);
            };
            current = table
                .entry(part.to_string())
                .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
        }

        match current {
            toml::Value::Table(table) => {
                table.insert(last.to_string(), parsed_value);
            }
            _ => anyhow::bail!("Cannot set value on non-table"),
        }

        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(&config)?;
        fs::write(&self.config_path, toml_string)
            .with_context(|| format!("Failed to write {}", self.config_path.display()))?;

        Ok(())
    }

    /// List all configuration values, sorted by key
    pub fn list(&self) -> Result<Vec<(String, String)>> {
        let value = self.load_value()?;

        let mut items = Vec::new();
        collect_values(&value, String::new(), &mut items);
        items.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(items)
    }
}

fn render_value(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        toml::Value::Array(items) => items
            .iter()
            .map(render_value)
            .collect::<Option<Vec<_>>>()
            .map(|items| items.join(",")),
        _ => None,
    }
}

fn collect_values(value: &toml::Value, prefix: String, items: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, val) in table {
                let new_prefix = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                collect_values(val, new_prefix, items);
            }
        }
        other => {
            if let Some(rendered) = render_value(other) {
                items.push((prefix, rendered));
            }
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<toml::Value> {
    let parsed: bool = value
        .parse()
        .with_context(|| format!("{key} must be 'true' or 'false'"))?;
    Ok(toml::Value::Boolean(parsed))
}

fn parse_choice(key: &str, value: &str, choices: &[&str]) -> Result<toml::Value> {
    let lowered = value.to_ascii_lowercase();
    if !choices.contains(&lowered.as_str()) {
        anyhow::bail!("{key} must be one of: {}", choices.join(", "));
    }
    Ok(toml::Value::String(lowered))
}

/// Validate a value and convert it to the TOML type its key expects
fn parse_config_value(key: &str, value: &str) -> Result<toml::Value> {
    match key {
        "listing.sequences"
        | "listing.show_hidden"
        | "listing.reverse_sort"
        | "listing.directories_first"
        | "output.color_enabled" => parse_bool(key, value),
        "listing.sequence_format" => parse_choice(key, value, &["sparse", "range"]),
        "listing.sort" => parse_choice(key, value, &["unsorted", "name"]),
        "output.default_format" => parse_choice(key, value, OUTPUT_FORMATS),
        "listing.sequence_extensions" => {
            let extensions: Vec<toml::Value> = value
                .split(',')
                .map(str::trim)
                .filter(|ext| !ext.is_empty())
                .map(|ext| {
                    if ext.starts_with('.') && ext.len() > 1 {
                        Ok(toml::Value::String(ext.to_lowercase()))
                    } else {
                        anyhow::bail!("extension '{ext}' must start with '.'")
                    }
                })
                .collect::<Result<_>>()?;
            Ok(toml::Value::Array(extensions))
        }
        "listing.filter_text" => Ok(toml::Value::String(value.to_string())),
        _ => anyhow::bail!("Unknown configuration key: {}", key),
    }
}

/// Load the configuration from the default location
pub fn get_config() -> Result<AppConfig> {
    ConfigManager::new().load()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_value_types() {
        assert_eq!(
            parse_config_value("listing.sequences", "false").unwrap(),
            toml::Value::Boolean(false)
        );
        assert_eq!(
            parse_config_value("listing.sort", "NAME").unwrap(),
            toml::Value::String("name".to_string())
        );
        assert!(parse_config_value("listing.sort", "size").is_err());
        assert!(parse_config_value("output.color_enabled", "maybe").is_err());
        assert!(parse_config_value("network.timeout", "1").is_err());
    }

    #[test]
    fn test_parse_extensions() {
        let value = parse_config_value("listing.sequence_extensions", ".EXR, .dpx").unwrap();
        assert_eq!(render_value(&value).unwrap(), ".exr,.dpx");
        assert!(parse_config_value("listing.sequence_extensions", "exr").is_err());
    }
}
