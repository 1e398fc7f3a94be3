// ABOUTME: Compile pass driver and deck assembly for the soapbox compiler
// ABOUTME: Stitches processed slides into the final fragment with TOC and placeholders

use crate::classify::{self, ClassifiedSlide, RenderOptions, SectionCounter};
use crate::config::Config;
use crate::dom;
use crate::downloads::Downloads;
use crate::errors::{DeckError, Result};
use crate::markdown::MarkdownRenderer;
use crate::sections::{self, Section};
use crate::slide;
use crate::transform::{self, TransformContext};
use crate::utils;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Built-in slide template: the slide body, nothing else.
const DEFAULT_TEMPLATE: &str = "~~~CONTENT~~~";

/// A table-of-contents entry derived from a subsection heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub title: String,
    pub anchor: String,
}

/// The output of one compile pass.
#[derive(Debug)]
pub struct CompiledDeck {
    /// The deck as a single HTML fragment; page chrome is applied elsewhere.
    pub html: String,
    /// Count of slides that survived filtering.
    pub slide_count: usize,
    /// Download entries declared by this pass's slides.
    pub downloads: Downloads,
}

#[derive(Default)]
struct PassState {
    slide_count: usize,
    counter: SectionCounter,
    downloads: Downloads,
}

/// Runs one compile pass over a presentation directory under fixed render
/// options. Owns no cross-pass state: everything a pass produces comes back
/// in the `CompiledDeck`.
pub struct Compiler<'a> {
    root: PathBuf,
    config: &'a Config,
    opts: &'a RenderOptions,
    renderer: &'a dyn MarkdownRenderer,
}

impl<'a> Compiler<'a> {
    pub fn new(
        root: &Path,
        config: &'a Config,
        opts: &'a RenderOptions,
        renderer: &'a dyn MarkdownRenderer,
    ) -> Self {
        Self {
            root: root.to_path_buf(),
            config,
            opts,
            renderer,
        }
    }

    /// Compile the whole presentation into a single HTML fragment.
    pub fn compile(&self) -> Result<CompiledDeck> {
        let mut state = PassState::default();
        let mut data = String::new();

        for section in sections::resolve(self.config, &self.root) {
            match section {
                Section::Heading(text) => {
                    // Section headings compile as synthetic one-slide
                    // documents so they share numbering and filtering with
                    // ordinary slides.
                    let name = heading_name(&text);
                    let content = format!("<!SLIDE subsection>\n{}", text);
                    data.push_str(&self.process_markdown(&name, &content, &mut state)?);
                }
                Section::Files(files) => {
                    for file in files {
                        let content =
                            utils::read_source(&file.path, self.config.encoding.as_deref())?;
                        data.push_str(&self.process_markdown(&file.name, &content, &mut state)?);
                    }
                }
            }
        }

        let html = assemble(&data, state.slide_count, self.opts);
        Ok(CompiledDeck {
            html,
            slide_count: state.slide_count,
            downloads: state.downloads,
        })
    }

    /// Segment, classify, render, and transform one source document.
    fn process_markdown(&self, name: &str, content: &str, state: &mut PassState) -> Result<String> {
        let slides = slide::segment(name, content);
        let classified = classify::classify(
            name,
            slides,
            self.opts,
            &mut state.counter,
            &mut state.slide_count,
        );

        let file_dir = Path::new(name)
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut out = String::new();
        for classified_slide in classified {
            debug!(
                "{}: slide {} tpl={} bg={:?}",
                classified_slide.reference,
                classified_slide.number,
                classified_slide.slide.template,
                classified_slide.slide.background
            );

            let template = self.template_text(&classified_slide.slide.template)?;
            let source = template.replace("~~~CONTENT~~~", &classified_slide.slide.body);
            let rendered = self.renderer.render(&source);

            let ctx = TransformContext {
                file_dir: file_dir.clone(),
                asset_path: &self.opts.asset_path,
                static_render: self.opts.static_render,
                trusted: self.opts.trusted,
                markers: &self.opts.markers,
                renderer: self.renderer,
            };
            let content_html = transform::apply(
                &rendered,
                classified_slide.number,
                &classified_slide.reference,
                &ctx,
                &mut state.downloads,
            );

            out.push_str(&wrap_slide(&classified_slide, &content_html));
        }
        Ok(out)
    }

    /// Look up a slide template's text. Unknown names and unreadable files
    /// fall back to the built-in template; paths escaping the presentation
    /// root are fatal for the pass.
    fn template_text(&self, name: &str) -> Result<String> {
        let relative = match self.config.templates.get(name) {
            Some(relative) => relative,
            None => {
                if name != "default" {
                    warn!("Unknown template {:?}; using the default", name);
                }
                return Ok(DEFAULT_TEMPLATE.to_string());
            }
        };

        match utils::resolve_within_root(&self.root, relative) {
            Ok(path) => match fs::read_to_string(&path) {
                Ok(text) => Ok(text),
                Err(err) => {
                    warn!("Template {:?} unreadable ({}); using the default", path, err);
                    Ok(DEFAULT_TEMPLATE.to_string())
                }
            },
            Err(DeckError::PathTraversalError(path)) => Err(DeckError::PathTraversalError(path)),
            Err(err) => {
                warn!("Template {:?} unavailable ({}); using the default", relative, err);
                Ok(DEFAULT_TEMPLATE.to_string())
            }
        }
    }
}

/// Wrap one transformed slide body in its `slide`/`content` divs.
fn wrap_slide(slide: &ClassifiedSlide, content_html: &str) -> String {
    let classes = slide.css_classes.join(" ");
    let slide_class = if classes.is_empty() {
        "slide".to_string()
    } else {
        format!("slide {}", classes)
    };
    let content_class = if classes.is_empty() {
        "content".to_string()
    } else {
        format!("content {}", classes)
    };

    let mut out = String::from("<div");
    out.push_str(&format!(" id=\"{}\"", slide.id));
    if let Some(bg) = &slide.slide.background {
        out.push_str(&format!(
            " style=\"background: url('file/{}') center no-repeat;\"",
            bg
        ));
    }
    out.push_str(&format!(
        " class=\"{}\" data-transition=\"{}\">",
        slide_class, slide.transition
    ));
    out.push_str(&format!(
        "<div class=\"{}\" ref=\"{}\">\n",
        content_class, slide.reference
    ));
    out.push_str(content_html);
    out.push_str("</div>\n</div>\n");
    out
}

/// Deck-wide placeholder substitution: slide count always, table of contents
/// only when requested and when the placeholder is actually present.
pub fn assemble(content: &str, num_slides: usize, opts: &RenderOptions) -> String {
    let content = content.replace("~~~NUM_SLIDES~~~", &num_slides.to_string());
    if opts.toc && content.contains("~~~TOC~~~") {
        let toc = render_toc(&toc_entries(&content));
        return content.replace("~~~TOC~~~", &toc);
    }
    content
}

/// Collect TOC entries from subsection containers that directly wrap an
/// `h1`, in document order. The anchor is the nearest ancestor carrying an
/// element id (the outer slide div).
pub fn toc_entries(html: &str) -> Vec<TocEntry> {
    let body = dom::parse_fragment(html);
    dom::select_all(&body, "div.subsection > h1")
        .iter()
        .filter_map(|h1| {
            let title = h1.as_node().text_contents().trim().to_string();
            let anchor = h1.as_node().ancestors().find_map(|ancestor| {
                ancestor
                    .as_element()
                    .and_then(|el| el.attributes.borrow().get("id").map(str::to_string))
            })?;
            Some(TocEntry { title, anchor })
        })
        .collect()
}

fn render_toc(entries: &[TocEntry]) -> String {
    let mut out = String::from("<div id=\"toc\">");
    for entry in entries {
        out.push_str(&format!(
            "<div class=\"tocentry\"><a href=\"#{}\">{}</a></div>",
            entry.anchor,
            dom::escape_text(&entry.title)
        ));
    }
    out.push_str("</div>");
    out
}

/// Heading text of a `#`-prefixed section entry: its first line, stripped of
/// leading hashes and whitespace.
fn heading_name(section: &str) -> String {
    section
        .lines()
        .next()
        .unwrap_or("")
        .trim_start_matches('#')
        .trim()
        .to_string()
}
