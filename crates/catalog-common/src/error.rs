use thiserror::Error;

/// Failure to parse a catalog enum from user-supplied text.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown operating system: {0}")]
    UnknownOs(String),

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("unknown priority: {0}")]
    UnknownPriority(String),

    #[error("unknown sort mode: {0}")]
    UnknownSortMode(String),
}

/// Inconsistent static taxonomy configuration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TaxonomyError {
    #[error("duplicate taxonomy path: {0}")]
    DuplicatePath(String),

    #[error("taxonomy root must live at \"/\", found {0}")]
    MisplacedRoot(String),
}
