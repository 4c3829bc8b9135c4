use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Parsed playground configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLConfig {
    /// Where the schema comes from; also the endpoint operations run against
    pub schema: SchemaConfig,

    /// Tool-specific settings keyed by extension name
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub extensions: HashMap<String, serde_json::Value>,
}

impl GraphQLConfig {
    /// Endpoint URL named by the `schema` key.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.schema.url()
    }

    /// HTTP headers to attach to requests against the endpoint.
    #[must_use]
    pub fn headers(&self) -> Vec<(&str, &str)> {
        match &self.schema {
            SchemaConfig::Url(_) => Vec::new(),
            SchemaConfig::Introspection(config) => config
                .headers
                .iter()
                .flatten()
                .map(|(name, value)| (name.as_str(), value.as_str()))
                .collect(),
        }
    }

    /// Raw settings for one extension.
    #[must_use]
    pub fn extension(&self, name: &str) -> Option<&serde_json::Value> {
        self.extensions.get(name)
    }

    /// Typed `graphiql` extension settings, defaulted when absent or malformed.
    #[must_use]
    pub fn graphiql(&self) -> GraphiqlExtension {
        let Some(value) = self.extension("graphiql") else {
            return GraphiqlExtension::default();
        };

        serde_json::from_value(value.clone()).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Ignoring malformed graphiql extension settings");
            GraphiqlExtension::default()
        })
    }
}

/// Schema source: a bare URL or a URL with request options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaConfig {
    Url(String),
    Introspection(IntrospectionSchemaConfig),
}

impl SchemaConfig {
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Url(url) => url,
            Self::Introspection(config) => &config.url,
        }
    }

    #[must_use]
    pub fn is_remote(&self) -> bool {
        let url = self.url();
        url.starts_with("http://") || url.starts_with("https://")
    }
}

/// Endpoint plus the headers to send with every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionSchemaConfig {
    pub url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
}

/// Settings under `extensions.graphiql`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GraphiqlExtension {
    pub doc_explorer_open: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_url_schema() {
        let config: GraphQLConfig =
            serde_json::from_str(r#"{"schema": "https://api.example.com/graphql"}"#).unwrap();
        assert_eq!(config.endpoint(), "https://api.example.com/graphql");
        assert!(config.schema.is_remote());
        assert!(config.headers().is_empty());
        assert_eq!(config.graphiql(), GraphiqlExtension::default());
    }

    #[test]
    fn test_schema_with_headers() {
        let config: GraphQLConfig = serde_json::from_str(
            r#"{"schema": {"url": "http://localhost:4000/", "headers": {"Authorization": "Bearer t"}}}"#,
        )
        .unwrap();
        assert_eq!(config.endpoint(), "http://localhost:4000/");
        assert_eq!(config.headers(), vec![("Authorization", "Bearer t")]);
    }

    #[test]
    fn test_graphiql_extension() {
        let config: GraphQLConfig = serde_json::from_str(
            r#"{"schema": "x", "extensions": {"graphiql": {"docExplorerOpen": true}}}"#,
        )
        .unwrap();
        assert!(config.graphiql().doc_explorer_open);
        assert!(!config.schema.is_remote());
    }

    #[test]
    fn test_malformed_graphiql_extension_defaults() {
        let config: GraphQLConfig =
            serde_json::from_str(r#"{"schema": "x", "extensions": {"graphiql": 3}}"#).unwrap();
        assert_eq!(config.graphiql(), GraphiqlExtension::default());
    }
}
