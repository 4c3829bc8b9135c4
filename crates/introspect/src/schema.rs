use crate::sdl::introspection_to_sdl;
use crate::types::IntrospectionResponse;
use crate::{IntrospectionError, Result};
use apollo_compiler::validation::Valid;
use apollo_compiler::Schema;

/// Source name attached to the schema built from introspection.
const INTROSPECTION_SOURCE: &str = "introspection.graphql";

/// Builds a validated schema from an introspection response.
///
/// A response without `data` is rejected with the server's `errors` in the
/// message.
#[tracing::instrument(skip_all)]
pub fn build_client_schema(response: &IntrospectionResponse) -> Result<Valid<Schema>> {
    let Some(data) = &response.data else {
        let detail = response
            .errors
            .as_ref()
            .and_then(|errors| serde_json::to_string(errors).ok())
            .unwrap_or_else(|| "response has no data".to_string());
        return Err(IntrospectionError::Invalid(detail));
    };

    if data.schema.query_type.is_none() {
        return Err(IntrospectionError::Invalid(
            "schema has no query root type".to_string(),
        ));
    }

    let sdl = introspection_to_sdl(&data.schema);
    let schema = Schema::parse_and_validate(sdl, INTROSPECTION_SOURCE).map_err(|invalid| {
        tracing::error!(errors = %invalid.errors, "introspected schema failed validation");
        IntrospectionError::Schema(invalid.errors.to_string())
    })?;

    tracing::info!(types = schema.types.len(), "built client schema");
    Ok(schema)
}
