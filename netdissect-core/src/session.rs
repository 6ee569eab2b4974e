//! Per-session state: configuration and the packet counter.

use chrono::{DateTime, Utc};
use tracing::trace;

use crate::error::Result;
use crate::protocol::{Dissector, Frame, DEFAULT_MAX_NAME_INDIRECTIONS};
use crate::render::{render, Verbosity};

/// Configuration for a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Rendering detail.
    pub verbosity: Verbosity,
    /// Pointer hops allowed per DNS name.
    pub max_name_indirections: usize,
    /// Keep the layers decoded before an error instead of failing the frame.
    pub partial: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::default(),
            max_name_indirections: DEFAULT_MAX_NAME_INDIRECTIONS,
            partial: false,
        }
    }
}

/// Numbers frames as they are dissected.
///
/// ```rust
/// use chrono::Utc;
/// use netdissect_core::{Session, SessionConfig};
///
/// let mut session = Session::new(SessionConfig::default());
/// // Too short for an Ethernet header; the frame still takes a number.
/// assert!(session.dissect(&[0u8; 4], Utc::now()).is_err());
/// assert_eq!(session.packets(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    dissector: Dissector,
    packets: u64,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            dissector: Dissector {
                max_name_indirections: config.max_name_indirections,
            },
            config,
            packets: 0,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Frames handed to [`Session::dissect`] so far, failed ones included.
    pub fn packets(&self) -> u64 {
        self.packets
    }

    /// Dissect the next frame. Its [`Frame::number`] is the updated counter.
    pub fn dissect(&mut self, data: &[u8], timestamp: DateTime<Utc>) -> Result<Frame> {
        self.packets += 1;
        trace!(packet = self.packets, len = data.len(), "dissecting frame");

        let mut frame = if self.config.partial {
            self.dissector.dissect_partial(data, timestamp)?
        } else {
            self.dissector.dissect(data, timestamp)?
        };
        frame.number = self.packets;
        Ok(frame)
    }

    /// Render a frame at the session verbosity.
    pub fn render(&self, frame: &Frame) -> String {
        render(frame, self.config.verbosity)
    }

    /// Dissect and render in one step.
    pub fn process(&mut self, data: &[u8], timestamp: DateTime<Utc>) -> Result<String> {
        let frame = self.dissect(data, timestamp)?;
        Ok(self.render(&frame))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
