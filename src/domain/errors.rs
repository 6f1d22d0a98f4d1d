use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("Invalid resource ID: {0}")]
    InvalidResourceId(String),

    #[error("Invalid user ID: {0}")]
    InvalidUserId(String),

    #[error("Invalid resource type: {0}")]
    InvalidResourceKind(String),

    #[error("Exam year is required for {0} resources")]
    MissingExamYear(String),

    #[error("Uploader is banned")]
    UploaderBanned,

    #[error("Uploader is restricted from uploading")]
    UploaderRestricted,
}
