use thiserror::Error;

pub type Result<T> = std::result::Result<T, HypergraphError>;

/// Error type for hypergraph store, query and write operations.
#[derive(Debug, Error)]
pub enum HypergraphError {
    #[error("connection error: {0}")]
    ConnectionError(String),
    #[error("schema error: {0}")]
    SchemaError(String),
    #[error("query error: {0}")]
    QueryError(String),
    #[error("record not found: {0}")]
    NotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("attribute missing: {0}")]
    AttributeMissing(String),
    #[error(
        "referential integrity violation: {table}.{attribute}={value} not present in {target}"
    )]
    ReferentialIntegrity {
        table: String,
        attribute: String,
        value: String,
        target: String,
    },
    #[error("cascade exceeded depth {0}")]
    CascadeDepth(usize),
}

impl HypergraphError {
    pub fn connection<T: Into<String>>(msg: T) -> Self {
        HypergraphError::ConnectionError(msg.into())
    }

    pub fn schema<T: Into<String>>(msg: T) -> Self {
        HypergraphError::SchemaError(msg.into())
    }

    pub fn query<T: Into<String>>(msg: T) -> Self {
        HypergraphError::QueryError(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        HypergraphError::NotFound(msg.into())
    }

    pub fn invalid_input<T: Into<String>>(msg: T) -> Self {
        HypergraphError::InvalidInput(msg.into())
    }

    pub fn attribute_missing<T: Into<String>>(msg: T) -> Self {
        HypergraphError::AttributeMissing(msg.into())
    }

    pub fn referential_integrity(
        table: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        HypergraphError::ReferentialIntegrity {
            table: table.into(),
            attribute: attribute.into(),
            value: value.into(),
            target: target.into(),
        }
    }

    pub fn is_referential_integrity(&self) -> bool {
        matches!(self, HypergraphError::ReferentialIntegrity { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, HypergraphError::NotFound(_))
    }
}
