/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when loading, saving, or inspecting a project.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Reading or writing a project file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The project JSON could not be parsed or produced.
    #[error("invalid project JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// No scene with the given id (or name) exists in the project.
    #[error("scene not found: {0}")]
    SceneNotFound(String),

    /// A generic validation error with a descriptive message.
    #[error("validation error: {0}")]
    Validation(String),
}
