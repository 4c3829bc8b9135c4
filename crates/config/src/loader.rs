use crate::{ConfigError, GraphQLConfig, Result, Storage};
use std::path::Path;

/// Path the browser-style loader persists its document to.
pub const CONFIG_PATH: &str = "./graphql-config.yml";

/// Public demo endpoint the example operation is written against.
pub const DEFAULT_ENDPOINT: &str = "https://swapi-graphql.netlify.com/.netlify/functions/index";

/// Extension names the playground understands under `extensions`.
pub const REGISTERED_EXTENSIONS: &[&str] = &["graphiql"];

/// Synthesize the configuration document for an endpoint.
#[must_use]
pub fn default_config_document(endpoint: &str) -> String {
    // A JSON string is a valid YAML double-quoted scalar.
    let schema = serde_json::Value::String(endpoint.to_string());
    format!("schema: {schema}\nextensions:\n  graphiql:\n    docExplorerOpen: false\n")
}

/// Persist `document` to `storage` at [`CONFIG_PATH`], then load it back.
///
/// A failed write is logged and otherwise ignored; the read that follows
/// decides whether loading succeeds. Read and parse failures are logged and
/// returned.
#[tracing::instrument(skip(storage, document), fields(path = CONFIG_PATH, size = document.len()))]
pub fn load_browser_config(storage: &dyn Storage, document: &str) -> Result<GraphQLConfig> {
    let path = Path::new(CONFIG_PATH);

    if let Err(e) = storage.write_file(path, document) {
        let error = ConfigError::io(path, e);
        tracing::error!(error = %error, "Failed to persist config document");
    }

    let result = storage
        .read_file(path)
        .map_err(|e| ConfigError::io(path, e))
        .and_then(|contents| load_config_from_str(&contents, path));

    match result {
        Ok(config) => {
            tracing::info!(endpoint = config.endpoint(), "Config loaded");
            Ok(config)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load config");
            Err(e)
        }
    }
}

/// Load a config file from disk.
#[tracing::instrument(fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Result<GraphQLConfig> {
    tracing::debug!("Reading config file");
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
    load_config_from_str(&contents, path)
}

/// Parse config contents. The path picks the format and labels errors.
#[tracing::instrument(skip(contents), fields(path = %path.display(), size = contents.len()))]
pub fn load_config_from_str(contents: &str, path: &Path) -> Result<GraphQLConfig> {
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

    let config = match extension {
        "yml" | "yaml" => {
            tracing::trace!("Parsing as YAML");
            parse_yaml(contents, path)?
        }
        "json" => {
            tracing::trace!("Parsing as JSON");
            parse_json(contents, path)?
        }
        _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    };

    validate_config(&config, path)?;
    Ok(config)
}

fn parse_yaml(contents: &str, path: &Path) -> Result<GraphQLConfig> {
    serde_saphyr::from_str(contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: format!("YAML parse error: {e}"),
    })
}

fn parse_json(contents: &str, path: &Path) -> Result<GraphQLConfig> {
    serde_json::from_str(contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: format!("JSON parse error: {e}"),
    })
}

fn validate_config(config: &GraphQLConfig, path: &Path) -> Result<()> {
    if config.endpoint().trim().is_empty() {
        return Err(ConfigError::Invalid {
            path: path.to_path_buf(),
            message: "schema endpoint is empty".to_string(),
        });
    }

    if !config.schema.is_remote() {
        tracing::warn!(
            endpoint = config.endpoint(),
            "Schema is not an HTTP endpoint and cannot be introspected"
        );
    }

    for name in config.extensions.keys() {
        if !REGISTERED_EXTENSIONS.contains(&name.as_str()) {
            tracing::warn!(extension = %name, "Config names an unregistered extension");
        }
    }

    Ok(())
}
