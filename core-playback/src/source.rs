//! Media source construction for a stream URI and start offset.

use bridge_traits::playback::{MediaSource, MICROS_PER_SECOND};

/// Build the source for `uri`, clipped to start at `offset_secs` when the
/// offset is positive.
///
/// A clipped source has no end bound and plays through to the natural end
/// of the stream. Zero, negative, and non-finite offsets produce an
/// unclipped source.
///
/// ```
/// use core_playback::source::build_media_source;
///
/// let source = build_media_source("http://x/a.mp3", 12.5, "Agent/1.0");
/// assert_eq!(source.start_position_us(), 12_500_000);
/// assert!(!build_media_source("http://x/a.mp3", 0.0, "Agent/1.0").is_clipped());
/// ```
pub fn build_media_source(uri: &str, offset_secs: f64, user_agent: &str) -> MediaSource {
    let source = MediaSource::Progressive {
        uri: uri.to_string(),
        user_agent: user_agent.to_string(),
    };

    if !(offset_secs.is_finite() && offset_secs > 0.0) {
        return source;
    }

    MediaSource::Clipping {
        source: Box::new(source),
        start_position_us: (offset_secs * MICROS_PER_SECOND as f64) as i64,
        end_position_us: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_offset_clips() {
        let source = build_media_source("http://x/a.mp3", 30.0, "UA");
        match &source {
            MediaSource::Clipping {
                source: inner,
                start_position_us,
                end_position_us,
            } => {
                assert_eq!(*start_position_us, 30_000_000);
                assert_eq!(*end_position_us, None);
                assert_eq!(
                    **inner,
                    MediaSource::Progressive {
                        uri: "http://x/a.mp3".into(),
                        user_agent: "UA".into(),
                    }
                );
            }
            other => panic!("expected clipping source, got {:?}", other),
        }
    }

    #[test]
    fn test_fractional_offset_truncates_to_micros() {
        let source = build_media_source("a", 0.0000015, "UA");
        assert_eq!(source.start_position_us(), 1);
    }

    #[test]
    fn test_non_positive_offsets_are_unclipped() {
        for offset in [0.0, -0.0, -3.0, f64::NAN, f64::NEG_INFINITY, f64::INFINITY] {
            let source = build_media_source("a", offset, "UA");
            assert!(!source.is_clipped(), "offset {} should not clip", offset);
            assert_eq!(source.start_position_us(), 0);
        }
    }
}
