use thiserror::Error;

/// Builder-level validation failure. A `Record` can only exist once none of
/// these can occur anymore.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("\"{value}\" is not a valid value for {field}")]
    InvalidEnum {
        field: &'static str,
        value: String,
    },

    #[error("\"{0}\" is not a valid phone. Seller phone should contain only digits.")]
    InvalidPhone(String),

    #[error("price can not be negative, got {0}")]
    NegativePrice(f64),

    #[error("{0} can not be empty!")]
    MissingField(&'static str),
}

/// Terminal failure of a single `parse` call. No variant is retried or
/// downgraded; the caller decides whether to skip or re-route the document.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid selector \"{selector}\": {message}")]
    InvalidSelector { selector: String, message: String },

    /// An expected markup container or node is absent — the document is
    /// malformed or the site changed its layout.
    #[error("expected markup not found: {0}")]
    MissingMarkup(String),

    #[error("invalid payload pattern \"{pattern}\": {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The script-variable marker for an embedded payload is absent.
    #[error("embedded payload \"{0}\" not found in document body")]
    MissingPayload(&'static str),

    #[error("can not decode embedded payload \"{name}\": {source}")]
    PayloadDecode {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A free-text categorical value has no known mapping to a closed enum.
    /// Unknown vocabulary must never silently default.
    #[error("can not map {field} from string \"{value}\"")]
    UnknownVocabulary {
        field: &'static str,
        value: String,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
