// Every variant states *where* things went wrong: either the host handed us
// a framebuffer description its storage can't back, or the demo window layer
// failed. The simulation itself has no failure path; pool exhaustion and
// off-buffer rectangles degrade silently.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The pixel storage is too small for the declared dimensions and pitch.
    #[error("framebuffer storage too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    /// A row's pitch can't even hold `width` pixels.
    #[error("framebuffer pitch {pitch} smaller than row size {row_bytes}")]
    PitchTooSmall { pitch: usize, row_bytes: usize },

    /// Creating the window failed.
    #[error("window init error: {0}")]
    WindowInit(String),

    /// Updating the window buffer failed.
    #[error("window update error: {0}")]
    WindowUpdate(String),
}
