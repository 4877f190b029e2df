#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Malformed path data: {0}")]
    MalformedPath(String),
    #[error("Invalid arc: {0}")]
    InvalidArc(String),
    #[error("Invalid options: {0}")]
    InvalidConfig(String),
}
