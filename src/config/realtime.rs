//! Real-time fan-out configuration

use serde::Deserialize;

use super::error::ValidationError;

/// WebSocket broadcast configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RealtimeConfig {
    /// Buffer size for each room's broadcast channel.
    ///
    /// A slow client that falls more than this many updates behind starts
    /// dropping the oldest ones and must re-read the queue.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl RealtimeConfig {
    /// Validate realtime configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.channel_capacity == 0 {
            return Err(ValidationError::InvalidChannelCapacity);
        }
        Ok(())
    }
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            channel_capacity: default_channel_capacity(),
        }
    }
}

fn default_channel_capacity() -> usize {
    128
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_realtime_defaults() {
        assert_eq!(RealtimeConfig::default().channel_capacity, 128);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = RealtimeConfig {
            channel_capacity: 0,
        };
        assert!(config.validate().is_err());
    }
}
