//! The revealed prefix of a filtered, sorted listing.

/// Tracks how many items of the current ordering are visible.
///
/// After every operation `visible_count <= available`, and it is a multiple
/// of `page_size` unless clamped to `available`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayWindow {
    page_size: usize,
    visible_count: usize,
}

impl DisplayWindow {
    /// A window showing the first page of `available` items.
    #[must_use]
    pub fn new(page_size: usize, available: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            page_size,
            visible_count: page_size.min(available),
        }
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// `true` when some of `available` items are still hidden.
    #[must_use]
    pub fn has_hidden(&self, available: usize) -> bool {
        self.visible_count < available
    }

    /// Shows the next page of already-loaded items. The count grows to the
    /// next multiple of `page_size`, clamped to `available`.
    pub fn reveal(&mut self, available: usize) {
        let next_page = (self.visible_count / self.page_size + 1) * self.page_size;
        self.visible_count = next_page.min(available);
    }

    /// Back to the first page.
    pub fn collapse(&mut self, available: usize) {
        self.visible_count = self.page_size.min(available);
    }

    /// Re-anchors on a new ordering or filter; same as [`Self::collapse`].
    pub fn reset(&mut self, available: usize) {
        self.collapse(available);
    }
}
