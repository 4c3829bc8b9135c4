//! A slice of the public Star Wars API schema.
//!
//! Big enough to run the playground's example operation (connections,
//! fragments, variables), small enough to read. `Film.created` is deprecated
//! for tests that need a deprecation warning. The root type is named `Root`,
//! not `Query`.

use apollo_compiler::validation::Valid;
use apollo_compiler::Schema;

/// The schema as SDL.
pub const SWAPI_SDL: &str = include_str!("../fixtures/swapi.graphql");

/// The same schema as an introspection response body (`{"data": {"__schema": ...}}`).
pub const SWAPI_INTROSPECTION: &str = include_str!("../fixtures/swapi_introspection.json");

/// A valid operation against [`SWAPI_SDL`] using one variable.
pub const FILMS_QUERY: &str = r"query Films($first: Int) {
  allFilms(first: $first) {
    edges {
      node {
        title
        director
      }
    }
  }
}
";

/// Parses and validates [`SWAPI_SDL`].
///
/// # Panics
///
/// Panics if the fixture does not validate.
#[must_use]
pub fn swapi_schema() -> Valid<Schema> {
    match Schema::parse_and_validate(SWAPI_SDL, "swapi.graphql") {
        Ok(schema) => schema,
        Err(invalid) => panic!("SWAPI fixture is invalid:\n{}", invalid.errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apollo_compiler::ast::OperationType;
    use apollo_compiler::Name;

    #[test]
    fn test_swapi_schema_root() {
        let schema = swapi_schema();
        assert_eq!(
            schema.root_operation(OperationType::Query).map(Name::as_str),
            Some("Root")
        );
        assert!(schema.type_field("Root", "allFilms").is_ok());
    }

    #[test]
    fn test_introspection_fixture_names_root() {
        assert!(SWAPI_INTROSPECTION.contains("\"queryType\""));
        assert!(SWAPI_INTROSPECTION.contains("\"Root\""));
    }
}
