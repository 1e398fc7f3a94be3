// ABOUTME: Download-link registry for the soapbox slide compiler
// ABOUTME: Collects .download block contents per compile pass for the viewer

/// A download block declared by a slide. `enabled` starts false and is
/// flipped by the viewer once the presenter reaches the declaring slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadEntry {
    pub slide_number: usize,
    pub enabled: bool,
    pub slide_name: String,
    pub files: Vec<String>,
}

/// Registry of download entries for one compile pass. Scoped to the pass and
/// returned from the compile call rather than held in process-wide state, so
/// concurrent passes cannot race and entries do not accumulate forever.
#[derive(Debug, Default)]
pub struct Downloads {
    entries: Vec<DownloadEntry>,
}

impl Downloads {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, slide_number: usize, slide_name: &str, files: Vec<String>) {
        self.entries.push(DownloadEntry {
            slide_number,
            enabled: false,
            slide_name: slide_name.to_string(),
            files,
        });
    }

    /// Mark every entry declared at or before this slide as reachable.
    pub fn enable_through(&mut self, slide_number: usize) {
        for entry in &mut self.entries {
            if entry.slide_number <= slide_number {
                entry.enabled = true;
            }
        }
    }

    pub fn entries(&self) -> &[DownloadEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
