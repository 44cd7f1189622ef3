/// Errors reported by a record store.
///
/// The `Display` output is the message clients see in `{"error": ...}`
/// bodies, so store-provided messages are rendered verbatim.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },
    /// The store could not be reached or its response could not be read.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    /// A row did not have the expected shape.
    #[error("{0}")]
    Serialization(#[from] serde_json::Error),
    /// An insert succeeded but returned no rows.
    #[error("Insert returned no rows")]
    EmptyInsert,
    /// The store refused the operation.
    #[error("{0}")]
    Rejected(String),
}
