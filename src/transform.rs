// ABOUTME: Per-slide HTML post-processing pipeline for the soapbox compiler
// ABOUTME: Paragraph classing, special blocks, downloads, image paths, code tagging

use crate::dom;
use crate::downloads::Downloads;
use crate::markdown::MarkdownRenderer;
use kuchiki::NodeRef;
use once_cell::sync::Lazy;
use regex::Regex;

/// Rewrites `<p>.word rest` into `<p class="word">rest`.
static P_CLASS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<p>\.(.*?) ").unwrap());

/// Per-slide state threaded through the pipeline stages.
pub struct TransformContext<'a> {
    /// Directory of the owning source file, relative to the presentation
    /// root. Empty for files at the root.
    pub file_dir: String,
    /// Prefix for dynamically served assets.
    pub asset_path: &'a str,
    pub static_render: bool,
    pub trusted: bool,
    /// Special-block marker classes to expand.
    pub markers: &'a [String],
    pub renderer: &'a dyn MarkdownRenderer,
}

/// Run the fixed transform chain over one slide's rendered HTML.
///
/// Stages apply in a fixed order and each is a pass-through when its trigger
/// does not match. Nothing in here can abort the compile pass: unparseable
/// fragments round-trip through the DOM layer unchanged-in-substance, and
/// selector failures degrade to no-ops.
pub fn apply(
    html: &str,
    slide_number: usize,
    slide_name: &str,
    ctx: &TransformContext,
    downloads: &mut Downloads,
) -> String {
    let classed = class_paragraphs(html);
    let body = dom::parse_fragment(&classed);

    expand_special_blocks(&body, ctx);
    extract_downloads(&body, slide_number, slide_name, downloads);
    rewrite_image_paths(&body, ctx);
    tag_commandline_code(&body);

    dom::serialize_children(&body)
}

/// Stage 1: a paragraph opening with a leading `.word ` token gets `word` as
/// its class attribute. This is what makes `.notes`, `.download` and friends
/// expressible in plain markdown.
pub fn class_paragraphs(html: &str) -> String {
    P_CLASS_RE.replace_all(html, "<p class=\"${1}\">").to_string()
}

/// Stage 2: replace the first paragraph of each active marker class with a
/// `div` containing its inner text re-rendered as markdown. Instructor
/// paragraphs are stripped outright for untrusted callers.
pub fn expand_special_blocks(body: &NodeRef, ctx: &TransformContext) {
    if !ctx.trusted {
        for paragraph in dom::select_all(body, "p.instructor") {
            paragraph.as_node().detach();
        }
    }

    for marker in ctx.markers {
        if marker == "instructor" && !ctx.trusted {
            continue;
        }
        if let Some(container) = dom::select_first(body, &format!("p.{}", marker)) {
            let raw = dom::serialize_children(container.as_node());
            let fixed = strip_marker_token(&raw, marker);
            let rendered = ctx.renderer.render(&fixed);
            dom::replace_with_html(
                container.as_node(),
                &format!("<div class=\"{}\">{}</div>", marker, rendered),
            );
        }
    }
}

/// Stage 3: the first `download` paragraph declares files for the download
/// registry. The paragraph is removed from the slide; the viewer renders the
/// registry elsewhere.
pub fn extract_downloads(
    body: &NodeRef,
    slide_number: usize,
    slide_name: &str,
    downloads: &mut Downloads,
) {
    if let Some(container) = dom::select_first(body, "p.download") {
        let text = container.as_node().text_contents();
        let text = strip_marker_token(&text, "download");
        let files: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        downloads.register(slide_number, slide_name, files);
        container.as_node().detach();
    }
}

/// Stage 4: rewrite relative image sources against the owning file's
/// directory. Absolute URLs and rooted paths are left alone; the static
/// `./file/` form is recognized so re-running the stage changes nothing.
pub fn rewrite_image_paths(body: &NodeRef, ctx: &TransformContext) {
    for img in dom::select_all(body, "img") {
        let src = img.attributes.borrow().get("src").map(str::to_string);
        let src = match src {
            Some(src) => src,
            None => continue,
        };
        if src.starts_with("http://")
            || src.starts_with("https://")
            || src.starts_with('/')
            || src.starts_with("./file/")
        {
            continue;
        }

        let relative = if ctx.file_dir.is_empty() {
            src
        } else {
            format!("{}/{}", ctx.file_dir, src)
        };
        let rewritten = if ctx.static_render {
            format!("./file/{}", relative)
        } else {
            format!("{}image/{}", ctx.asset_path, relative)
        };
        img.attributes.borrow_mut().insert("src", rewritten);
    }
}

/// Stage 5: a `<pre><code>` block whose first line is `@@@lang` loses that
/// line and the enclosing `<pre>` is classed `sh_lang` for the highlighter.
pub fn tag_commandline_code(body: &NodeRef) {
    for pre in dom::select_all(body, "pre") {
        for code in dom::select_all(pre.as_node(), "code") {
            let out = code.as_node().text_contents();
            let mut lines = out.split('\n');
            let first = match lines.next() {
                Some(first) => first,
                None => continue,
            };
            if !first.trim().starts_with("@@@") {
                continue;
            }

            let stripped = first.replace("@@@", "");
            let lang = stripped.trim().to_lowercase();
            if !lang.is_empty() {
                pre.attributes
                    .borrow_mut()
                    .insert("class", format!("sh_{}", lang));
            }
            let rest: Vec<&str> = lines.collect();
            dom::set_text(code.as_node(), &rest.join("\n"));
        }
    }
}

/// Strip a leading `.marker ` token, tolerating a missing trailing space.
fn strip_marker_token(raw: &str, marker: &str) -> String {
    let token = format!(".{}", marker);
    match raw.strip_prefix(&token) {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest).to_string(),
        None => raw.to_string(),
    }
}
