use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrreryError {
    #[error("Body '{0}' has no parent; every body except the Sun needs one")]
    MissingParent(String),

    #[error("Parent chain of body '{0}' forms a cycle")]
    ParentCycle(String),

    #[error("Unknown body: {0}")]
    UnknownBody(String),

    #[error("Body '{0}' needs orbital elements but the catalog provides none")]
    MissingOrbit(String),

    #[error("Invalid body catalog: {0}")]
    InvalidCatalog(String),

    #[error("State of body '{0}' is degenerate; cannot extract osculating elements")]
    DegenerateState(String),

    #[error("Catalog parse error: {0}")]
    CatalogParse(#[from] toml::de::Error),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),
}

impl PartialEq for OrreryError {
    fn eq(&self, other: &Self) -> bool {
        use OrreryError::*;
        match (self, other) {
            (MissingParent(a), MissingParent(b)) => a == b,
            (ParentCycle(a), ParentCycle(b)) => a == b,
            (UnknownBody(a), UnknownBody(b)) => a == b,
            (MissingOrbit(a), MissingOrbit(b)) => a == b,
            (InvalidCatalog(a), InvalidCatalog(b)) => a == b,
            (DegenerateState(a), DegenerateState(b)) => a == b,

            // These errors are not comparable: equal if same variant
            (CatalogParse(_), CatalogParse(_)) => true,
            (IoError(_), IoError(_)) => true,

            _ => false,
        }
    }
}
