use thiserror::Error;

/// Configuration errors raised while building choreography state.
///
/// Nothing here is surfaced to the page; the web layer logs these and falls
/// back to a neutral controller.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChoreoError {
    #[error("region window [{start}, {end}] must satisfy start < end")]
    InvalidWindow { start: f32, end: f32 },
    #[error("unknown vector field preset `{0}`")]
    UnknownPreset(String),
    #[error("path needs at least one point")]
    EmptyPath,
}

pub type Result<T> = std::result::Result<T, ChoreoError>;
