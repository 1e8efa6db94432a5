//! Contiguous study period and its reference window.

use crate::error::CalendarError;

/// Inclusive, contiguous range of calendar years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearRange {
    start: i32,
    end: i32,
}

impl YearRange {
    /// Creates a range covering `start..=end`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidYearRange`] if `end < start`.
    pub fn new(start: i32, end: i32) -> Result<Self, CalendarError> {
        if end < start {
            return Err(CalendarError::InvalidYearRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// First year of the range.
    pub fn start(&self) -> i32 {
        self.start
    }

    /// Last year of the range.
    pub fn end(&self) -> i32 {
        self.end
    }

    /// Number of years in the range.
    pub fn len(&self) -> usize {
        (self.end - self.start) as usize + 1
    }

    /// Always `false`; a valid range holds at least one year.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns `true` if `year` lies within the range.
    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }

    /// 0-based position of `year` within the range.
    pub fn position(&self, year: i32) -> Option<usize> {
        self.contains(year).then(|| (year - self.start) as usize)
    }

    /// Iterates the years in ascending order.
    pub fn iter(&self) -> std::ops::RangeInclusive<i32> {
        self.start..=self.end
    }

    /// The first `n` years of the range.
    ///
    /// The window is positional: it always starts at the first year supplied.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::RangeTooShort`] if the range holds fewer
    /// than `n` years, or `n` is zero.
    pub fn reference_window(&self, n: usize) -> Result<Self, CalendarError> {
        if n == 0 || self.len() < n {
            return Err(CalendarError::RangeTooShort {
                start: self.start,
                end: self.end,
                len: self.len(),
                required: n.max(1),
            });
        }
        Ok(Self {
            start: self.start,
            end: self.start + n as i32 - 1,
        })
    }
}

impl IntoIterator for YearRange {
    type Item = i32;
    type IntoIter = std::ops::RangeInclusive<i32>;

    fn into_iter(self) -> Self::IntoIter {
        self.start..=self.end
    }
}

impl std::fmt::Display for YearRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}
