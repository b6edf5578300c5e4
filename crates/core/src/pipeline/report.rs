use serde::Serialize;

/// Progress of a migration run, complete or partial.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub pages_scanned: u32,
    pub items_scanned: usize,
    pub items_written: usize,
    /// The run stopped at the page limit while the source still had data.
    pub truncated: bool,
    /// Row count read back from the sink, when verification ran.
    pub verified_rows: Option<usize>,
}

impl RunReport {
    /// Records a page read from the source.
    pub fn record_page(&mut self, items: usize) {
        self.pages_scanned += 1;
        self.items_scanned += items;
    }

    /// Records records committed to the sink.
    pub fn record_written(&mut self, written: usize) {
        self.items_written += written;
    }
}
