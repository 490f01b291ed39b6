//! The rendered page, as seen by the filter

/// The list container, its package elements and the query input
pub trait CatalogView {
    /// Overwrite the text shown in the query input
    fn set_query_text(&mut self, text: &str);

    /// Take the whole list out of the layout
    fn hide_container(&mut self);

    /// Put the list back into the layout
    fn reveal_container(&mut self);

    /// Show or hide the package element at `index` (catalog order)
    fn set_visible(&mut self, index: usize, visible: bool);
}

/// In-memory page used by the CLI and by tests
#[derive(Debug, Clone)]
pub struct MemoryView {
    query_text: String,
    container_hidden: bool,
    visible: Vec<bool>,
    stats: ViewStats,
}

/// Counters over the writes a view received
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewStats {
    pub hides: usize,
    pub reveals: usize,
    /// Element writes while the container was out of the layout
    pub hidden_writes: usize,
    /// Element writes while the container was on screen
    pub exposed_writes: usize,
}

impl MemoryView {
    /// A page with `len` elements, all shown as rendered
    pub fn new(len: usize) -> Self {
        Self {
            query_text: String::new(),
            container_hidden: false,
            visible: vec![true; len],
            stats: ViewStats::default(),
        }
    }

    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    pub fn is_container_hidden(&self) -> bool {
        self.container_hidden
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.get(index).copied().unwrap_or(false)
    }

    pub fn visible_flags(&self) -> &[bool] {
        &self.visible
    }

    pub fn stats(&self) -> ViewStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = ViewStats::default();
    }
}

impl CatalogView for MemoryView {
    fn set_query_text(&mut self, text: &str) {
        self.query_text = text.to_string();
    }

    fn hide_container(&mut self) {
        self.container_hidden = true;
        self.stats.hides += 1;
    }

    fn reveal_container(&mut self) {
        self.container_hidden = false;
        self.stats.reveals += 1;
    }

    fn set_visible(&mut self, index: usize, visible: bool) {
        if let Some(slot) = self.visible.get_mut(index) {
            *slot = visible;
        }
        if self.container_hidden {
            self.stats.hidden_writes += 1;
        } else {
            self.stats.exposed_writes += 1;
        }
    }
}
