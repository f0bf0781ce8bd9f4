/// Convenience result type used across celpad.
pub type CelResult<T> = Result<T, CelError>;

/// Precondition violations surfaced by the data model and the cel.
///
/// These are programming errors of the calling glue, never transient
/// conditions: nothing here is retried or recovered automatically.
#[derive(thiserror::Error, Debug)]
pub enum CelError {
    /// A stroke operation arrived before any frame was made active.
    #[error("no active frame set on the cel")]
    NoActiveFrame,

    /// A stroke point arrived while the active frame had no stroke to extend.
    #[error("frame {frame} has no stroke to extend")]
    NoStroke { frame: usize },

    /// A frame index did not resolve to an existing frame.
    #[error("frame index {index} out of range (animation has {len} frames)")]
    FrameOutOfRange { index: usize, len: usize },

    /// Playback was configured with a non-positive or non-finite rate.
    #[error("invalid frame rate {0} (must be a positive number)")]
    InvalidFps(f64),

    /// The display refresh rate is unusable for the wall-clock ticker.
    #[error("invalid refresh rate {0} (must be between 1 and {max} Hz)", max = crate::player::MAX_REFRESH_HZ)]
    InvalidRefreshRate(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_message_names_index_and_len() {
        let msg = CelError::FrameOutOfRange { index: 4, len: 2 }.to_string();
        assert!(msg.contains("index 4"));
        assert!(msg.contains("2 frames"));
    }

    #[test]
    fn refresh_rate_message_names_the_bound() {
        let msg = CelError::InvalidRefreshRate(5000.0).to_string();
        assert!(msg.contains("5000"));
        assert!(msg.contains("1000 Hz"));
    }
}
