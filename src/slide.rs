// ABOUTME: Slide data model and markdown segmentation for the soapbox compiler
// ABOUTME: Splits raw markdown into slide units on embedded !SLIDE directive markers

use crate::options::parse_options;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// Matches a directive marker line: `!SLIDE ...` or `<!SLIDE ...>`.
/// The captured group is the directive context (options plus classes).
static MARKER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^<?!SLIDE(.*)$").unwrap());

/// Splits the directive context into an optional bracketed option string and
/// the whitespace-separated class tokens.
static CONTEXT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\[(.*?)\])?(.*)$").unwrap());

/// Top-level headings, used for the implicit-split fallback.
static H1_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^# ").unwrap());

/// A single presentable unit: a contiguous span of markdown bounded by
/// directive markers, plus the options carried on its opening directive.
#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    /// Template name from the `tpl` option.
    pub template: String,
    /// Background image reference from the `bg` option.
    pub background: Option<String>,
    /// Class tokens in insertion order. Control tokens (`transition=`, `#id`)
    /// are consumed later by the classifier; the rest render as CSS classes.
    pub classes: Vec<String>,
    /// Accumulated raw markdown lines, newline-joined.
    pub body: String,
}

impl Slide {
    /// Build a slide from the trimmed directive context, e.g.
    /// `[tpl=hpi,bg=photo.png] subsection transition=fade`.
    pub fn new(context: &str) -> Self {
        let mut template = "default".to_string();
        let mut background = None;
        let mut classes = Vec::new();

        if let Some(caps) = CONTEXT_RE.captures(context) {
            let options = parse_options(caps.get(2).map_or("", |m| m.as_str()));
            if let Some(Some(tpl)) = options.get("tpl") {
                template = tpl.clone();
            }
            if let Some(Some(bg)) = options.get("bg") {
                background = Some(bg.clone());
            }
            if let Some(rest) = caps.get(3) {
                let rest = rest.as_str().trim();
                let rest = rest.strip_suffix('>').unwrap_or(rest);
                classes = rest.split_whitespace().map(String::from).collect();
            }
        }

        Slide {
            template,
            background,
            classes,
            body: String::new(),
        }
    }

    pub fn push_line(&mut self, line: &str) {
        self.body.push_str(line);
        self.body.push('\n');
    }

    /// A slide is empty iff its trimmed body is blank or it carries exactly
    /// the `skip` class. Empty slides never reach the classifier.
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty() || self.classes == ["skip"]
    }
}

/// Segment a raw markdown document into slides.
///
/// If the document contains no directive markers at all, every top-level
/// `# ` heading implicitly starts a new slide (normalized by a pre-pass that
/// inserts synthetic `<!SLIDE>` markers). Empty slides are dropped after
/// segmentation; a file with no content and no markers yields zero slides.
pub fn segment(name: &str, content: &str) -> Vec<Slide> {
    let content = if content.lines().any(|line| MARKER_RE.is_match(line)) {
        Cow::Borrowed(content)
    } else {
        H1_RE.replace_all(content, "<!SLIDE>\n# ")
    };

    debug!("{}: {} lines", name, content.lines().count());

    let mut slides = vec![Slide::new("")];
    for line in content.lines() {
        if let Some(caps) = MARKER_RE.captures(line) {
            let context = caps.get(1).map_or("", |m| m.as_str()).trim();
            slides.push(Slide::new(context));
        } else if let Some(current) = slides.last_mut() {
            current.push_line(line);
        }
    }

    slides.retain(|slide| !slide.is_empty());
    slides
}
