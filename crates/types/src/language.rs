//! Language tags attached to editor buffers.

/// Language of a text buffer; selects which providers the editor consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageId {
    /// Operations and fragments
    GraphQL,
    /// Variables and results
    Json,
}

impl LanguageId {
    /// The identifier the editor registry uses for this language.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GraphQL => "graphql",
            Self::Json => "json",
        }
    }

    /// Parse an editor language identifier.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "graphql" | "gql" => Some(Self::GraphQL),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl std::fmt::Display for LanguageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_ids() {
        assert_eq!(LanguageId::GraphQL.as_str(), "graphql");
        assert_eq!(LanguageId::from_id("gql"), Some(LanguageId::GraphQL));
        assert_eq!(LanguageId::from_id("json"), Some(LanguageId::Json));
        assert_eq!(LanguageId::from_id("yaml"), None);
        assert_eq!(LanguageId::Json.to_string(), "json");
    }
}
