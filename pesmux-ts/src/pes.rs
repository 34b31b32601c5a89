//! PES packet representation.
//!
//! The generator produces [`PesPacket`] records: the elementary stream
//! payload of one access unit together with the sidecar metadata the
//! downstream TS packetizer needs (stream id, 90 kHz timestamps).
//! Serializing the on-wire PES header is the packetizer's job, not
//! ours.

use std::fmt;

/// PES stream ID assigned to the first video stream (0xE0).
pub const VIDEO_STREAM_ID: u8 = 0xE0;

/// PES stream ID assigned to the first audio stream (0xC0).
pub const AUDIO_STREAM_ID: u8 = 0xC0;

/// Check if a stream ID falls in the video range (0xE0 - 0xEF).
pub fn is_video_stream_id(id: u8) -> bool {
    (0xE0..=0xEF).contains(&id)
}

/// Check if a stream ID falls in the audio range (0xC0 - 0xDF).
pub fn is_audio_stream_id(id: u8) -> bool {
    (0xC0..=0xDF).contains(&id)
}

/// One PES packet: payload plus packetizer metadata.
///
/// Owned by the generator's ready queue until dequeued, at which point
/// ownership transfers fully to the caller.
#[derive(Clone, PartialEq, Eq)]
pub struct PesPacket {
    stream_id: u8,
    /// Presentation timestamp in 90 kHz ticks.
    pts: i64,
    /// Decode timestamp in 90 kHz ticks.
    dts: i64,
    data: Vec<u8>,
}

impl PesPacket {
    /// Create a new PES packet.
    pub fn new(stream_id: u8, pts: i64, dts: i64, data: Vec<u8>) -> Self {
        Self {
            stream_id,
            pts,
            dts,
            data,
        }
    }

    /// The PES stream ID.
    pub fn stream_id(&self) -> u8 {
        self.stream_id
    }

    /// Presentation timestamp in 90 kHz ticks.
    pub fn pts(&self) -> i64 {
        self.pts
    }

    /// Decode timestamp in 90 kHz ticks.
    pub fn dts(&self) -> i64 {
        self.dts
    }

    /// The packet payload.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the packet, returning its payload.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Check if this packet belongs to a video stream.
    pub fn is_video(&self) -> bool {
        is_video_stream_id(self.stream_id)
    }

    /// Check if this packet belongs to an audio stream.
    pub fn is_audio(&self) -> bool {
        is_audio_stream_id(self.stream_id)
    }
}

impl fmt::Debug for PesPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PesPacket")
            .field("stream_id", &format_args!("{:#04x}", self.stream_id))
            .field("pts", &self.pts)
            .field("dts", &self.dts)
            .field("size", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_id_ranges() {
        assert!(is_video_stream_id(VIDEO_STREAM_ID));
        assert!(is_video_stream_id(0xEF));
        assert!(!is_video_stream_id(0xC0));

        assert!(is_audio_stream_id(AUDIO_STREAM_ID));
        assert!(is_audio_stream_id(0xDF));
        assert!(!is_audio_stream_id(0xE0));
    }

    #[test]
    fn test_pes_packet_accessors() {
        let packet = PesPacket::new(VIDEO_STREAM_ID, 90_000, 87_000, vec![1, 2, 3]);
        assert_eq!(packet.stream_id(), 0xE0);
        assert_eq!(packet.pts(), 90_000);
        assert_eq!(packet.dts(), 87_000);
        assert_eq!(packet.data(), &[1, 2, 3]);
        assert!(packet.is_video());
        assert!(!packet.is_audio());
        assert_eq!(packet.into_data(), vec![1, 2, 3]);
    }
}
