use thiserror::Error;

#[derive(Debug, Error)]
pub enum EffectError {
    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),
    #[error("invalid surface dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("presenter failure: {0}")]
    Presenter(String),
}
