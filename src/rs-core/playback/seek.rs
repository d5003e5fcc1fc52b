use tracing::debug;

use super::CommandError;
use crate::engines::MediaEngine;

/// Convert a pointer position into a fraction of a progress bar.
///
/// `client_x` and `bar_left` are horizontal coordinates in the same referential, `bar_width`
/// the width of the bar. Returns `None` if the bar has no usable width.
///
/// The result is not bounded: pointers outside of the bar give fractions outside of `[0, 1]`,
/// which `seek_to_fraction` then rejects.
pub(crate) fn pointer_fraction(client_x: f64, bar_left: f64, bar_width: f64) -> Option<f64> {
    if !bar_width.is_finite() || bar_width <= 0. {
        return None;
    }
    Some((client_x - bar_left) / bar_width)
}

/// Seek to `fraction` of the media duration, as reported by the engine.
///
/// Returns the position seeked to, in seconds. Nothing is sent to the engine if `fraction` is
/// outside `[0, 1]` or if the duration is not known yet.
pub(crate) fn seek_to_fraction<E: MediaEngine + ?Sized>(
    engine: &mut E,
    fraction: f64,
) -> Result<f64, CommandError> {
    if !(0. ..=1.).contains(&fraction) {
        return Err(CommandError::SeekOutOfBounds(fraction));
    }
    let duration = engine.duration();
    if !duration.is_finite() || duration <= 0. {
        return Err(CommandError::UnknownDuration);
    }
    let position = fraction * duration;
    debug!("Seek: seeking to {position} ({fraction} of {duration})");
    engine.seek(position);
    Ok(position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{FakeEngines, MediaCall};

    #[test]
    fn test_pointer_fraction() {
        assert_eq!(pointer_fraction(50., 0., 200.), Some(0.25));
        assert_eq!(pointer_fraction(150., 100., 200.), Some(0.25));
        assert_eq!(pointer_fraction(-10., 0., 200.), Some(-0.05));
        assert_eq!(pointer_fraction(50., 0., 0.), None);
        assert_eq!(pointer_fraction(50., 0., f64::NAN), None);
    }

    #[test]
    fn test_seek_inside_bounds() {
        let engines = FakeEngines::new();
        let mut media = engines.media();
        media.set_duration(240.);
        for fraction in [0., 0.25, 0.5, 1.] {
            assert_eq!(seek_to_fraction(&mut media, fraction), Ok(fraction * 240.));
        }
        assert_eq!(
            engines.media_calls(),
            vec![
                MediaCall::Seek(0.),
                MediaCall::Seek(60.),
                MediaCall::Seek(120.),
                MediaCall::Seek(240.),
            ]
        );
    }

    #[test]
    fn test_seek_outside_bounds() {
        let engines = FakeEngines::new();
        let mut media = engines.media();
        media.set_duration(240.);
        assert_eq!(
            seek_to_fraction(&mut media, -0.01),
            Err(CommandError::SeekOutOfBounds(-0.01))
        );
        assert_eq!(
            seek_to_fraction(&mut media, 1.01),
            Err(CommandError::SeekOutOfBounds(1.01))
        );
        assert!(seek_to_fraction(&mut media, f64::NAN).is_err());
        assert!(engines.media_calls().is_empty());
    }

    #[test]
    fn test_seek_with_unknown_duration() {
        let engines = FakeEngines::new();
        let mut media = engines.media();
        media.set_duration(f64::NAN);
        assert_eq!(
            seek_to_fraction(&mut media, 0.5),
            Err(CommandError::UnknownDuration)
        );
        media.set_duration(0.);
        assert_eq!(
            seek_to_fraction(&mut media, 0.5),
            Err(CommandError::UnknownDuration)
        );
        assert!(engines.media_calls().is_empty());
    }

    #[test]
    fn test_seek_from_pointer() {
        let engines = FakeEngines::new();
        let mut media = engines.media();
        media.set_duration(240.);
        let fraction = pointer_fraction(50., 0., 200.).unwrap();
        assert_eq!(seek_to_fraction(&mut media, fraction), Ok(60.));
    }
}
