//! Testing utilities.
//!
//! [`MockConverter`] stands in for ffmpeg so batch runs can be exercised
//! without external binaries.

mod mock_converter;

pub use mock_converter::{
    MockConverter, RecordedEncode, DEFAULT_MOCK_DURATION_SECS, DEFAULT_MOCK_OUTPUT_SIZE,
};
