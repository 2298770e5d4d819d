pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An operation that consumes the selection set was invoked with nothing
    /// selected. Surfaced to the user; the model is left unchanged.
    #[error("No nodes selected")]
    EmptySelection,

    #[error("Malformed mind map document: {message}")]
    DocumentParse { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
