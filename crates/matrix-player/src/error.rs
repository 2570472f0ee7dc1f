use std::path::PathBuf;

/// Errors surfaced by the frame pipeline. All of them end playback.
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error("no animation files specified")]
    NoInputs,

    #[error("file '{}' not found", .0.display())]
    MissingFile(PathBuf),

    #[error("open {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("decode {path:?}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("no frames loaded from {path:?}")]
    EmptyAnimation { path: PathBuf },

    #[error("frame is {actual:?} but the display is {expected:?}")]
    CanvasMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("display write failed")]
    Display(#[source] std::io::Error),
}

impl PlayerError {
    /// `true` for the decode family (unreadable, unsupported or empty container).
    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            PlayerError::Open { .. } | PlayerError::Decode { .. } | PlayerError::EmptyAnimation { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, PlayerError>;
