/// Knobs for a single migration run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Stop after this many pages even if the source has more.
    pub max_pages: Option<u32>,
    /// Read the sink back after the last page.
    pub verify: bool,
}

impl PipelineOptions {
    /// Returns true once `pages_done` pages reach the configured limit.
    pub fn page_limit_reached(&self, pages_done: u32) -> bool {
        self.max_pages.is_some_and(|max| pages_done >= max)
    }
}
