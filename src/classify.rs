// ABOUTME: Render-mode filtering and section numbering for segmented slides
// ABOUTME: Decides which slides participate in a pass and assigns refs/ids/transitions

use crate::slide::Slide;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

static TRANSITION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^transition=(.+)$").unwrap());
static ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#([\w-]+)").unwrap());

/// Render-mode configuration, immutable for the duration of one compile pass.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Include `toc`-tagged slides and build the table of contents.
    pub toc: bool,
    /// Print rendering: drops `noprint` slides instead of `printonly` ones.
    pub print: bool,
    /// When set, keep only supplemental slides carrying this tag.
    pub supplemental: Option<String>,
    /// Static export: image paths rewrite to `./file/...` instead of the
    /// dynamic asset route.
    pub static_render: bool,
    /// Prefix for dynamically served assets.
    pub asset_path: String,
    /// Gate for `instructor` special blocks; untrusted callers have them
    /// stripped outright.
    pub trusted: bool,
    /// Special-block marker classes expanded by the transform pipeline.
    /// `notes` is always sensible; `handouts`/`instructor`/`solguide` are
    /// enabled per deployment mode.
    pub markers: Vec<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            toc: false,
            print: false,
            supplemental: None,
            static_render: false,
            asset_path: "/".to_string(),
            trusted: false,
            markers: vec!["notes".to_string()],
        }
    }
}

/// Running section number, reset at the start of a compile pass and carried
/// across files within it. Only `subsection` slides advance it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectionCounter {
    pub major: u32,
    pub minor: u32,
}

impl SectionCounter {
    pub fn advance(&mut self) {
        self.major += 1;
        self.minor = 0;
    }
}

/// A slide that survived filtering, with its control tokens consumed into
/// explicit fields and the remaining tokens left as CSS classes.
#[derive(Debug, Clone)]
pub struct ClassifiedSlide {
    pub slide: Slide,
    /// Global 1-based number across the whole pass, counting survivors only.
    pub number: usize,
    /// 1-based position among this file's survivors.
    pub seq: usize,
    /// Stable per-file reference: `name` alone when the file produced a
    /// single surviving slide, otherwise `name/seq`.
    pub reference: String,
    pub id: String,
    pub transition: String,
    pub css_classes: Vec<String>,
}

/// Filter and number one file's segmented slides.
///
/// The section counter is updated for every `subsection` slide before any
/// filtering, so numbering reflects document structure rather than the
/// rendered subset. Filters apply in a fixed order, each short-circuiting to
/// exclusion: supplemental, then toc, then print.
pub fn classify(
    name: &str,
    slides: Vec<Slide>,
    opts: &RenderOptions,
    counter: &mut SectionCounter,
    slide_count: &mut usize,
) -> Vec<ClassifiedSlide> {
    let mut survivors: Vec<ClassifiedSlide> = Vec::new();

    for slide in slides {
        let has = |class: &str| slide.classes.iter().any(|c| c == class);

        if has("subsection") {
            counter.advance();
        }

        match &opts.supplemental {
            Some(tag) => {
                if !(has("supplemental") && has(tag)) {
                    continue;
                }
            }
            None => {
                if has("supplemental") {
                    continue;
                }
            }
        }

        if !opts.toc && has("toc") {
            continue;
        }

        if opts.print {
            if has("noprint") {
                continue;
            }
        } else if has("printonly") {
            continue;
        }

        *slide_count += 1;

        let mut transition = "none".to_string();
        let mut id = None;
        let mut css_classes = Vec::new();
        for class in &slide.classes {
            if let Some(caps) = TRANSITION_RE.captures(class) {
                transition = caps[1].to_string();
            } else if let Some(caps) = ID_RE.captures(class) {
                id = Some(caps[1].to_string());
            } else {
                css_classes.push(class.clone());
            }
        }
        let id = id.unwrap_or_else(|| name.to_string());

        debug!("id: {}", id);
        debug!("classes: {:?}", css_classes);
        debug!("transition: {}", transition);

        survivors.push(ClassifiedSlide {
            slide,
            number: *slide_count,
            seq: survivors.len() + 1,
            reference: String::new(),
            id,
            transition,
            css_classes,
        });
    }

    let multiple = survivors.len() > 1;
    for classified in &mut survivors {
        classified.reference = if multiple {
            format!("{}/{}", name, classified.seq)
        } else {
            name.to_string()
        };
    }

    survivors
}
