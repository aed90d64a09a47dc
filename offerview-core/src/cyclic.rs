//! Cyclic index arithmetic for carousel layouts.
//!
//! All functions are total: a zero `count` never divides and an
//! out-of-range `active` index is wrapped before use.

use serde::Serialize;

/// Wrap `index` into `[0, count)`. Returns 0 when `count == 0`.
pub fn wrap_index(index: usize, count: usize) -> usize {
    if count == 0 {
        0
    } else {
        index % count
    }
}

/// Distance from `active` to `index` walking forward around the ring:
/// `(index - active + count) mod count`.
pub fn relative_offset(index: usize, active: usize, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let index = index % count;
    let active = active % count;
    (index + count - active) % count
}

/// Move `active` by `delta` positions around a ring of `count` items.
pub fn step(active: usize, delta: isize, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let count_i = count as isize;
    let active = (active % count) as isize;
    (active + delta % count_i + count_i).rem_euclid(count_i) as usize
}

/// How a slot relates to the focused one in a three-slot window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OffsetClass {
    /// Offset 0
    Focused,
    /// Offset 1
    Next,
    /// Offset 2, the slot shown on the opposite side of the focus
    Previous,
    /// Outside the window
    Hidden,
}

impl OffsetClass {
    /// Classify a relative offset for the tri-focus window.
    ///
    /// The window is `{0, 1, 2}`; with three slots, offset 2 is also
    /// `count - 1`, the slot before the focus.
    pub fn classify(offset: usize) -> Self {
        match offset {
            0 => OffsetClass::Focused,
            1 => OffsetClass::Next,
            2 => OffsetClass::Previous,
            _ => OffsetClass::Hidden,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_offset_in_range() {
        for count in 1..8 {
            for active in 0..count {
                assert_eq!(relative_offset(active, active, count), 0);
                for index in 0..count {
                    let offset = relative_offset(index, active, count);
                    assert!(offset < count, "offset {offset} out of range for {count}");
                }
            }
        }
    }

    #[test]
    fn test_relative_offset_wraps() {
        assert_eq!(relative_offset(0, 3, 4), 1);
        assert_eq!(relative_offset(2, 3, 4), 3);
        assert_eq!(relative_offset(4, 1, 5), 3);
    }

    #[test]
    fn test_single_and_empty_rings() {
        assert_eq!(relative_offset(0, 0, 1), 0);
        assert_eq!(relative_offset(3, 7, 0), 0);
        assert_eq!(wrap_index(5, 0), 0);
        assert_eq!(step(0, 1, 1), 0);
        assert_eq!(step(0, -1, 0), 0);
    }

    #[test]
    fn test_out_of_range_active_is_wrapped() {
        assert_eq!(relative_offset(1, 9, 4), 0);
        assert_eq!(wrap_index(9, 4), 1);
        assert_eq!(step(9, 1, 4), 2);
    }

    #[test]
    fn test_step_round_trip() {
        for count in 2..6 {
            for active in 0..count {
                let forward = step(active, 1, count);
                assert_eq!(step(forward, -1, count), active);
            }
        }
        assert_eq!(step(0, -1, 3), 2);
        assert_eq!(step(2, 1, 3), 0);
        assert_eq!(step(1, -7, 3), 0);
    }

    #[test]
    fn test_classify() {
        assert_eq!(OffsetClass::classify(0), OffsetClass::Focused);
        assert_eq!(OffsetClass::classify(1), OffsetClass::Next);
        assert_eq!(OffsetClass::classify(2), OffsetClass::Previous);
        assert_eq!(OffsetClass::classify(3), OffsetClass::Hidden);
    }
}
