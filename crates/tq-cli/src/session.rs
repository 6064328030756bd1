//! Pagination state for browsing matches one at a time

/// A result list plus the index of the match being shown.
#[derive(Debug)]
pub struct MatchCursor<T> {
    items: Vec<T>,
    index: usize,
}

impl<T> MatchCursor<T> {
    /// Returns `None` for an empty result list.
    pub fn new(items: Vec<T>) -> Option<Self> {
        if items.is_empty() {
            None
        } else {
            Some(Self { items, index: 0 })
        }
    }

    pub fn current(&self) -> &T {
        &self.items[self.index]
    }

    /// 1-based position of the current match.
    pub fn position(&self) -> usize {
        self.index + 1
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false: a cursor is only built over a non-empty list.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.items.len()
    }

    /// Move to the next match; false when already on the last one.
    pub fn advance(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Move to the previous match; false when already on the first one.
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }
}
