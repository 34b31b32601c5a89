//! Media sample abstractions.
//!
//! A [`MediaSample`] is one access unit of encoded media data together
//! with its timestamps, as handed over by the demuxer.

use bitflags::bitflags;
use std::borrow::Cow;
use std::fmt;

bitflags! {
    /// Flags for sample properties.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SampleFlags: u32 {
        /// This sample is a key frame.
        const KEYFRAME = 0x0001;
        /// Sample data is corrupted.
        const CORRUPT = 0x0002;
    }
}

/// One encoded access unit.
///
/// Samples can own their data or reference external data (zero-copy).
/// PTS and DTS are expressed in the owning stream's time scale.
#[derive(Clone)]
pub struct MediaSample<'a> {
    /// The sample payload.
    data: Cow<'a, [u8]>,
    /// Presentation timestamp in stream time-scale ticks.
    pub pts: i64,
    /// Decode timestamp in stream time-scale ticks.
    pub dts: i64,
    /// Sample flags.
    pub flags: SampleFlags,
}

impl<'a> MediaSample<'a> {
    /// Create a new sample with owned data.
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data: Cow::Owned(data),
            pts: 0,
            dts: 0,
            flags: SampleFlags::empty(),
        }
    }

    /// Create a new sample referencing external data.
    pub fn from_slice(data: &'a [u8]) -> Self {
        Self {
            data: Cow::Borrowed(data),
            pts: 0,
            dts: 0,
            flags: SampleFlags::empty(),
        }
    }

    /// Get the sample data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get the size of the sample data.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Check if this is a key frame.
    pub fn is_key_frame(&self) -> bool {
        self.flags.contains(SampleFlags::KEYFRAME)
    }

    /// Set the key frame flag.
    pub fn set_key_frame(&mut self, key_frame: bool) {
        if key_frame {
            self.flags.insert(SampleFlags::KEYFRAME);
        } else {
            self.flags.remove(SampleFlags::KEYFRAME);
        }
    }

    /// Set PTS and DTS.
    pub fn with_timestamps(mut self, pts: i64, dts: i64) -> Self {
        self.pts = pts;
        self.dts = dts;
        self
    }

    /// Set the key frame flag, builder style.
    pub fn with_key_frame(mut self, key_frame: bool) -> Self {
        self.set_key_frame(key_frame);
        self
    }

    /// Make the sample own its data.
    pub fn into_owned(self) -> MediaSample<'static> {
        MediaSample {
            data: Cow::Owned(self.data.into_owned()),
            pts: self.pts,
            dts: self.dts,
            flags: self.flags,
        }
    }
}

impl fmt::Debug for MediaSample<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaSample")
            .field("size", &self.size())
            .field("pts", &self.pts)
            .field("dts", &self.dts)
            .field("flags", &self.flags)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_creation() {
        let sample = MediaSample::new(vec![0u8; 64]).with_timestamps(1000, 900);
        assert_eq!(sample.size(), 64);
        assert_eq!(sample.pts, 1000);
        assert_eq!(sample.dts, 900);
        assert!(!sample.is_key_frame());
    }

    #[test]
    fn test_sample_key_frame_flag() {
        let mut sample = MediaSample::from_slice(&[1, 2, 3]);
        sample.set_key_frame(true);
        assert!(sample.is_key_frame());
        sample.set_key_frame(false);
        assert!(!sample.is_key_frame());
    }

    #[test]
    fn test_sample_into_owned() {
        let data = [1u8, 2, 3];
        let sample = MediaSample::from_slice(&data).with_key_frame(true);
        let owned: MediaSample<'static> = sample.into_owned();
        assert_eq!(owned.data(), &[1, 2, 3]);
        assert!(owned.is_key_frame());
    }
}
