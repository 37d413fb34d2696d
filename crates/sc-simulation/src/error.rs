/// Alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;

/// Errors surfaced by the engine.
///
/// Malformed authored data never errors; it is inert. Only requests the
/// host makes directly can fail.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// The requested scene id does not exist in the project.
    #[error("scene not found: {0}")]
    SceneNotFound(String),

    /// The project has no scenes to play.
    #[error("project has no scenes")]
    NoScenes,
}
