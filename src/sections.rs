// ABOUTME: Section resolution for the soapbox compiler
// ABOUTME: Expands configured sections into the ordered list of markdown files

use crate::config::Config;
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// A markdown source file scheduled for compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Presentation-root-relative name with the `.md` extension removed;
    /// used for slide refs and default element ids.
    pub name: String,
}

/// One resolved section: either a literal heading or a run of source files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    /// A `#`-prefixed heading string, compiled as a synthetic subsection slide.
    Heading(String),
    Files(Vec<SourceFile>),
}

/// Resolve the configured sections into compile order. Directory entries
/// expand recursively, lexicographically sorted, keeping `.md` files only.
/// Missing paths resolve to empty sections rather than failing.
pub fn resolve(config: &Config, root: &Path) -> Vec<Section> {
    let mut sections = Vec::new();

    for entry in &config.sections {
        if entry.starts_with('#') {
            sections.push(Section::Heading(entry.clone()));
            continue;
        }

        let base = if entry == "." {
            root.to_path_buf()
        } else {
            root.join(entry)
        };
        let mut paths: Vec<PathBuf> = Vec::new();
        if base.is_dir() {
            let pattern = format!("{}/**/*", base.display());
            if let Ok(matches) = glob::glob(&pattern) {
                paths.extend(matches.filter_map(|p| p.ok()));
            }
            paths.sort();
        } else if base.is_file() {
            paths.push(base);
        } else {
            warn!("Section entry {:?} does not exist; skipping", base);
        }

        let files: Vec<SourceFile> = paths
            .into_iter()
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("md"))
            .map(|path| {
                let name = file_name(&path, root);
                SourceFile { path, name }
            })
            .collect();
        debug!("section {:?}: {} markdown files", entry, files.len());
        sections.push(Section::Files(files));
    }

    sections
}

fn file_name(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let name = relative.to_string_lossy().replace('\\', "/");
    name.strip_suffix(".md").unwrap_or(&name).to_string()
}
