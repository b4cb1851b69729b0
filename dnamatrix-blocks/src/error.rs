use thiserror::Error;

pub type BlockResult<T> = Result<T, BlockError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BlockError {
    #[error("JSON error: {0}")]
    Json(String),

    #[error("Malformed project: {0}")]
    MalformedProject(String),

    #[error("Duplicate block id '{id}': block ids must be unique within the project")]
    DuplicateBlockId { id: String },

    #[error("Block on page '{page}' at position {index} has an empty id")]
    EmptyBlockId { page: String, index: usize },

    #[error("Block '{id}' not found")]
    BlockNotFound { id: String },

    #[error("Unknown block type '{code}': not present in the block catalog")]
    UnknownBlockType { code: String },

    #[error("Page '{page}' not found")]
    PageNotFound { page: String },

    #[error("Invalid override section '{section}'. Expected one of: {expected}")]
    InvalidOverrideSection { section: String, expected: String },

    #[error("Cannot move block '{id}' {direction}: it is already at the edge of the page")]
    CannotMove { id: String, direction: String },
}

impl From<serde_json::Error> for BlockError {
    fn from(err: serde_json::Error) -> Self {
        BlockError::Json(err.to_string())
    }
}
