//! Application-level configuration.
//!
//! [`SessionParams`] controls the timing of the simulated reply and
//! feature flows. Tests set the delays to zero; the binary fills them from
//! file configuration.

use std::time::Duration;

/// Timing parameters of a chat session.
#[derive(Debug, Clone)]
pub struct SessionParams {
    /// Lower bound of the simulated typing delay before a reply.
    pub reply_delay_min: Duration,
    /// Upper bound of the simulated typing delay before a reply.
    pub reply_delay_max: Duration,
    /// Delay before a simulated image preview arrives.
    pub image_delay: Duration,
    /// Delay before the simulated voice transcription is captured.
    pub voice_delay: Duration,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            reply_delay_min: Duration::from_millis(1500),
            reply_delay_max: Duration::from_millis(2500),
            image_delay: Duration::from_millis(2500),
            voice_delay: Duration::from_millis(3000),
        }
    }
}

impl SessionParams {
    /// Zero-delay parameters for deterministic tests.
    pub fn immediate() -> Self {
        Self {
            reply_delay_min: Duration::ZERO,
            reply_delay_max: Duration::ZERO,
            image_delay: Duration::ZERO,
            voice_delay: Duration::ZERO,
        }
    }
}
