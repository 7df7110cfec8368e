//! Per-line dirty flags plus the global force-redraw flag.

#[derive(Debug, Clone, Default)]
pub struct DirtyState {
    per_line: Vec<bool>,
    force_redraw: bool,
}

impl DirtyState {
    pub fn new(lines: usize) -> Self {
        Self {
            per_line: vec![false; lines],
            force_redraw: true,
        }
    }

    /// Grow with `false` or truncate to `lines`. Called before every read.
    pub fn sync_len(&mut self, lines: usize) {
        self.per_line.resize(lines, false);
    }

    pub fn mark(&mut self, row: usize) {
        if row >= self.per_line.len() {
            self.per_line.resize(row + 1, false);
        }
        self.per_line[row] = true;
    }

    pub fn force(&mut self) {
        self.force_redraw = true;
    }

    pub fn is_forced(&self) -> bool {
        self.force_redraw
    }

    pub fn is_dirty(&self, row: usize) -> bool {
        self.per_line.get(row).copied().unwrap_or(false)
    }

    /// Clear the flag for a repainted row.
    pub fn clear(&mut self, row: usize) {
        if let Some(flag) = self.per_line.get_mut(row) {
            *flag = false;
        }
    }

    /// End of a full frame pass.
    pub fn finish_frame(&mut self) {
        self.force_redraw = false;
    }

    /// Drop every row flag (a forced pass repainted everything visible).
    pub fn clear_all(&mut self) {
        self.per_line.iter_mut().for_each(|d| *d = false);
    }

    pub fn dirty_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.per_line
            .iter()
            .enumerate()
            .filter_map(|(i, d)| d.then_some(i))
    }
}
