//! Initial buffer contents.

/// Operation shown when the playground opens. It exercises fragments,
/// aliases, nested connections and variables against the Star Wars API.
pub const EXAMPLE_QUERY: &str = r"fragment SpeciesItem on Species {
  language
  name
  averageHeight
  averageLifespan
}

fragment StarshipItem on Starship {
  name
  maxAtmospheringSpeed
  length
  hyperdriveRating
}

fragment FilmWithSpecies on Film {
  speciesConnection(first: $speciesSkip) {
    totalCount
    edges {
      node {
        ...SpeciesItem
      }
    }
  }
}

fragment FilmWithShips on Film {
  starships: starshipConnection(first: $speciesSkip) {
    edges {
      node {
        ...StarshipItem
      }
    }
  }
}

query NamedQuery($filmSkip: Int!, $speciesSkip: Int!) {
  films: allFilms(first: $filmSkip) {
    edges {
      node {
        title
        ...FilmWithSpecies
        ...FilmWithShips
      }
    }
  }
}
";

/// Variables for [`EXAMPLE_QUERY`].
pub const EXAMPLE_VARIABLES: &str = r#"{
  "speciesSkip": 5,
  "filmSkip": 2
}
"#;

/// Results buffer before the first run.
pub const EMPTY_RESULTS: &str = "{}";

pub const QUERY_CONTAINER: &str = "container-query";
pub const VARIABLES_CONTAINER: &str = "container-variables";
pub const RESULTS_CONTAINER: &str = "container-results";

/// Action that executes the operation.
pub const RUN_ACTION_ID: &str = "ex-op";
pub const RUN_ACTION_LABEL: &str = "Execute GraphQL Operation";

pub const FORMAT_ACTION_ID: &str = "editor.action.formatDocument";
pub const FORMAT_ACTION_LABEL: &str = "Format Document";
