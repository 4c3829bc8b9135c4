//! HTTP client for a single GraphQL endpoint.

use crate::{IntrospectionError, IntrospectionResponse, Result, INTROSPECTION_QUERY};
use serde::{Deserialize, Serialize};

/// Request body for an operation: `{ "query": ..., "variables": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationRequest {
    pub query: String,
    pub variables: serde_json::Value,
}

impl OperationRequest {
    #[must_use]
    pub fn new(query: impl Into<String>, variables: serde_json::Value) -> Self {
        Self {
            query: query.into(),
            variables,
        }
    }
}

/// Response to an executed operation. Either member may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResponse {
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub errors: Option<serde_json::Value>,
}

/// Posts JSON requests to one endpoint with a fixed set of headers.
///
/// Requests are sent once. There is no retry and no timeout.
///
/// ```no_run
/// use graphql_introspect::{GraphQLClient, OperationRequest};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GraphQLClient::new("https://api.example.com/graphql")
///     .with_header("Authorization", "Bearer token");
/// let request = OperationRequest::new("{ hero { name } }", serde_json::Value::Null);
/// let response = client.execute(&request).await?;
/// println!("{:?}", response.data);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GraphQLClient {
    endpoint: String,
    headers: Vec<(String, String)>,
    http: reqwest::Client,
}

impl GraphQLClient {
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            headers: Vec::new(),
            http: reqwest::Client::new(),
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Runs the introspection query.
    ///
    /// Non-2xx statuses are reported as [`IntrospectionError::Http`].
    #[tracing::instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn introspect(&self) -> Result<IntrospectionResponse> {
        let body = serde_json::json!({ "query": INTROSPECTION_QUERY });
        let response = self.post(&body).await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %text, "introspection request rejected");
            return Err(IntrospectionError::Http(status.as_u16(), text));
        }

        let introspection: IntrospectionResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "failed to parse introspection response");
            IntrospectionError::Parse(e.to_string())
        })?;

        if let Some(data) = &introspection.data {
            tracing::info!(
                types = data.schema.types.len(),
                directives = data.schema.directives.len(),
                "introspection successful"
            );
        }
        Ok(introspection)
    }

    /// Executes an operation.
    ///
    /// GraphQL servers answer validation failures with a 4xx status and a
    /// regular `{ errors }` body, so the body is parsed whatever the status.
    /// Only a non-2xx status with a body that is not a GraphQL response is an
    /// error.
    #[tracing::instrument(skip(self, request), fields(endpoint = %self.endpoint))]
    pub async fn execute(&self, request: &OperationRequest) -> Result<ExecutionResponse> {
        let response = self.post(request).await?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| IntrospectionError::Network(e.to_string()))?;

        match serde_json::from_str::<ExecutionResponse>(&text) {
            Ok(parsed) => {
                tracing::debug!(
                    status = status.as_u16(),
                    has_data = parsed.data.is_some(),
                    has_errors = parsed.errors.is_some(),
                    "operation completed"
                );
                Ok(parsed)
            }
            Err(_) if !status.is_success() => {
                tracing::error!(status = status.as_u16(), body = %text, "operation request rejected");
                Err(IntrospectionError::Http(status.as_u16(), text))
            }
            Err(e) => Err(IntrospectionError::Parse(e.to_string())),
        }
    }

    async fn post<B: Serialize + ?Sized>(&self, body: &B) -> Result<reqwest::Response> {
        let mut request = self
            .http
            .post(&self.endpoint)
            .header("content-type", "application/json");
        for (name, value) in &self.headers {
            request = request.header(name, value);
        }

        request.json(body).send().await.map_err(|e| {
            tracing::error!(error = %e, "request failed");
            IntrospectionError::Network(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_client_headers() {
        let client = GraphQLClient::new("http://localhost/graphql")
            .with_header("Authorization", "Bearer token")
            .with_headers([("X-Api-Key", "key123")]);

        assert_eq!(client.endpoint(), "http://localhost/graphql");
        assert_eq!(client.headers.len(), 2);
        assert_eq!(client.headers[1], ("X-Api-Key".to_string(), "key123".to_string()));
    }

    #[test]
    fn test_operation_request_body() {
        let request = OperationRequest::new("{ a }", serde_json::Value::Null);
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body, serde_json::json!({ "query": "{ a }", "variables": null }));
    }

    #[tokio::test]
    async fn test_execute_posts_query_and_variables() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(header("content-type", "application/json"))
            .and(header("authorization", "Bearer token"))
            .and(body_partial_json(serde_json::json!({
                "query": "query($id: ID!) { human(id: $id) { name } }",
                "variables": { "id": "1000" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": { "human": { "name": "Luke Skywalker" } }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GraphQLClient::new(format!("{}/graphql", server.uri()))
            .with_header("Authorization", "Bearer token");
        let request = OperationRequest::new(
            "query($id: ID!) { human(id: $id) { name } }",
            serde_json::json!({ "id": "1000" }),
        );
        let response = client.execute(&request).await.unwrap();

        assert_eq!(
            response.data,
            Some(serde_json::json!({ "human": { "name": "Luke Skywalker" } }))
        );
        assert!(response.errors.is_none());
    }

    #[tokio::test]
    async fn test_execute_reads_errors_from_400() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "errors": [{ "message": "Cannot query field \"nope\" on type \"Query\"." }]
            })))
            .mount(&server)
            .await;

        let client = GraphQLClient::new(server.uri());
        let response = client
            .execute(&OperationRequest::new("{ nope }", serde_json::Value::Null))
            .await
            .unwrap();

        assert!(response.data.is_none());
        assert!(response.errors.is_some());
    }

    #[tokio::test]
    async fn test_execute_non_graphql_error_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let client = GraphQLClient::new(server.uri());
        let err = client
            .execute(&OperationRequest::new("{ a }", serde_json::Value::Null))
            .await
            .unwrap_err();

        assert!(matches!(err, IntrospectionError::Http(502, ref body) if body == "bad gateway"));
    }

    #[tokio::test]
    async fn test_introspect_parses_schema() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({ "query": INTROSPECTION_QUERY })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(graphql_test_utils::SWAPI_INTROSPECTION)
                    .insert_header("content-type", "application/json"),
            )
            .mount(&server)
            .await;

        let client = GraphQLClient::new(server.uri());
        let response = client.introspect().await.unwrap();
        let data = response.data.unwrap();
        assert_eq!(data.schema.query_type.unwrap().name, "Root");
        assert!(data.schema.types.iter().any(|t| t.name == "Starship"));
    }

    #[tokio::test]
    async fn test_introspect_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
            .mount(&server)
            .await;

        let client = GraphQLClient::new(server.uri());
        let err = client.introspect().await.unwrap_err();
        assert!(matches!(err, IntrospectionError::Http(401, _)));
    }

    #[tokio::test]
    async fn test_network_failure() {
        let client = GraphQLClient::new("http://127.0.0.1:1/graphql");
        let err = client.introspect().await.unwrap_err();
        assert!(matches!(err, IntrospectionError::Network(_)));
    }
}
