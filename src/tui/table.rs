/// Selection and scroll position over the filtered result list
pub struct ResultListState {
    pub selected: Option<usize>,
    pub scroll_offset: usize,
    /// Whole items that fit in the list area, updated on draw
    pub visible_rows: usize,
}

impl Default for ResultListState {
    fn default() -> Self {
        Self {
            selected: None,
            scroll_offset: 0,
            visible_rows: 5,
        }
    }
}

impl ResultListState {
    pub fn reset(&mut self) {
        self.selected = None;
        self.scroll_offset = 0;
    }

    /// Items one page key moves by, keeping one row of context
    pub fn page(&self) -> isize {
        self.visible_rows.saturating_sub(1).max(1) as isize
    }

    /// Select `index` clamped into the list, scrolling it into view
    pub fn select(&mut self, index: usize, total: usize) {
        if total == 0 {
            self.reset();
            return;
        }
        let index = index.min(total - 1);
        self.selected = Some(index);

        let rows = self.visible_rows.max(1);
        self.scroll_offset = self.scroll_offset.clamp(index.saturating_sub(rows - 1), index);
    }

    /// Move the selection by `delta` items. With nothing selected, moving
    /// forward starts from the top.
    pub fn move_by(&mut self, delta: isize, total: usize) {
        let target = match self.selected {
            Some(i) => i.saturating_add_signed(delta),
            None => delta.max(1) as usize - 1,
        };
        self.select(target, total);
    }

    /// Keep the selection inside a list that may have shrunk
    pub fn clamp(&mut self, total: usize) {
        match self.selected {
            Some(i) => self.select(i, total),
            None if total == 0 => self.reset(),
            None => self.scroll_offset = self.scroll_offset.min(total - 1),
        }
    }
}
