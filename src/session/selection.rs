/// Keyboard cursor over a result list.
///
/// `None` means nothing is highlighted. Moving down stops at the last row; moving up from the
/// first row clears the highlight rather than wrapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    index: Option<usize>,
}

impl Selection {
    /// The highlighted row, if any.
    #[must_use]
    pub const fn index(self) -> Option<usize> {
        self.index
    }

    /// Moves down one row over a list of `len` rows, stopping at the last.
    pub fn next(&mut self, len: usize) {
        if len == 0 {
            self.index = None;
            return;
        }
        self.index = Some(match self.index {
            None => 0,
            Some(i) => (i + 1).min(len - 1),
        });
    }

    /// Moves up one row; from the first row the highlight is cleared.
    pub fn previous(&mut self) {
        self.index = match self.index {
            None | Some(0) => None,
            Some(i) => Some(i - 1),
        };
    }

    /// Highlights `index` if it lies inside a list of `len` rows.
    pub fn set(&mut self, index: usize, len: usize) -> bool {
        if index < len {
            self.index = Some(index);
            true
        } else {
            false
        }
    }

    /// Clears the highlight.
    pub fn reset(&mut self) {
        self.index = None;
    }

    /// The highlighted row if it is valid for a list of `len` rows.
    #[must_use]
    pub fn committable(self, len: usize) -> Option<usize> {
        self.index.filter(|&i| i < len)
    }
}
