/// Represent a range of time, from a start to an end, generally in seconds
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeRange {
    start: f64,
    end: f64,
}

/// Chronologically-ordered ranges of media time, in seconds, that the media engine has buffered.
///
/// This mirrors what an HTMLMediaElement's `buffered` attribute reports: ranges are expected
/// to be already sorted and non-overlapping, as the engine maintains them itself.
#[derive(Clone, Debug, PartialEq)]
pub struct BufferedRanges {
    ranges: Vec<TimeRange>,
}

impl BufferedRanges {
    /// Build a `BufferedRanges` from a flat list of `start, end` couples, as communicated by
    /// the JavaScript-side.
    ///
    /// A trailing lone value is ignored, as are ranges with non-finite bounds or whose end is
    /// before their start.
    pub(crate) fn from_flat(flat: &[f64]) -> Self {
        let ranges = flat
            .chunks_exact(2)
            .filter(|c| c[0].is_finite() && c[1].is_finite() && c[1] >= c[0])
            .map(|c| TimeRange {
                start: c[0],
                end: c[1],
            })
            .collect();
        Self { ranges }
    }

    /// Returns the ending time of the last buffered range.
    ///
    /// Returns `None` if nothing is buffered.
    pub(crate) fn last_end(&self) -> Option<f64> {
        self.ranges.last().map(|r| r.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flat() {
        let ranges = BufferedRanges::from_flat(&[0., 10., 15., 30.]);
        assert_eq!(ranges.last_end(), Some(30.));
        assert_eq!(BufferedRanges::from_flat(&[]).last_end(), None);
    }

    #[test]
    fn test_from_flat_ignores_invalid_values() {
        let odd = BufferedRanges::from_flat(&[0., 10., 15.]);
        assert_eq!(odd, BufferedRanges::from_flat(&[0., 10.]));
        assert_eq!(odd.last_end(), Some(10.));

        let invalid = BufferedRanges::from_flat(&[5., 2., f64::NAN, 4.]);
        assert_eq!(invalid, BufferedRanges::from_flat(&[]));
        assert_eq!(invalid.last_end(), None);

        let trailing_invalid = BufferedRanges::from_flat(&[0., 10., 20., f64::INFINITY]);
        assert_eq!(trailing_invalid.last_end(), Some(10.));
    }
}
