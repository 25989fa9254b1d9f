//! HTML text extraction.
//!
//! Parsing goes through scraper (html5ever), so unclosed tags and stray
//! markup are recovered the way a browser recovers them. Every function
//! accepts a raw HTML fragment and returns empty output for empty input.
//!
//! [`Document`] bundles the views a full analysis pass needs so the fragment
//! is parsed once per pass.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};
use serde::Serialize;

/// Elements whose boundaries separate words in the rendered text.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "details", "div", "dl", "dt",
    "figcaption", "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li",
    "main", "nav", "ol", "p", "pre", "section", "summary", "table", "td", "th", "tr", "ul",
];

/// Elements whose contents are never visible text.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "template", "noscript"];

/// Heading element with its contents, for [`strip_headings`].
static HEADING_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<h[1-6](?:\s[^>]*)?>.*?</h[1-6]\s*>").expect("valid regex"));

static HEADINGS: LazyLock<Selector> = LazyLock::new(|| selector("h1, h2, h3, h4, h5, h6"));
static H1: LazyLock<Selector> = LazyLock::new(|| selector("h1"));
static PARAGRAPHS: LazyLock<Selector> = LazyLock::new(|| selector("p"));
static IMAGES: LazyLock<Selector> = LazyLock::new(|| selector("img"));
static LINKS: LazyLock<Selector> = LazyLock::new(|| selector("a[href]"));
static STYLED: LazyLock<Selector> = LazyLock::new(|| selector("[style], font[color]"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid selector")
}

/// An `<img>` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    /// The `alt` attribute, if present.
    pub alt: Option<String>,
}

/// An `<a href>` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// The `href` attribute.
    pub href: String,
    /// Visible anchor text, whitespace-collapsed.
    pub text: String,
}

/// The text views of one HTML document used by a single analysis pass.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Visible text of the whole document.
    pub plain_text: String,
    /// Heading texts (h1–h6) in document order.
    pub headings: Vec<String>,
    /// Texts of `<h1>` elements only.
    pub h1s: Vec<String>,
    /// Non-empty paragraph texts.
    pub paragraphs: Vec<String>,
    /// First non-empty paragraph outside any `<h1>`.
    pub first_paragraph: String,
    /// All images.
    pub images: Vec<Image>,
    /// All links with an `href`.
    pub links: Vec<Link>,
    html: String,
}

impl Document {
    /// Parse an HTML fragment into its text views.
    #[tracing::instrument(skip_all, fields(html_len = html.len()))]
    pub fn parse(html: &str) -> Self {
        if html.trim().is_empty() {
            return Self::default();
        }
        let fragment = Html::parse_fragment(html);
        let document = Self {
            plain_text: visible_text(fragment.root_element()),
            headings: select_texts(&fragment, &HEADINGS),
            h1s: select_texts(&fragment, &H1),
            paragraphs: select_texts(&fragment, &PARAGRAPHS),
            first_paragraph: first_paragraph_of(&fragment),
            images: images_of(&fragment),
            links: links_of(&fragment),
            html: html.to_string(),
        };
        tracing::debug!(
            headings = document.headings.len(),
            paragraphs = document.paragraphs.len(),
            images = document.images.len(),
            links = document.links.len(),
            "parsed document"
        );
        document
    }

    /// Build a document from plain text with no markup.
    ///
    /// Blank-line separated blocks become paragraphs; there are no headings,
    /// images, or links.
    pub fn from_plain_text(text: &str) -> Self {
        let paragraphs: Vec<String> = text
            .split("\n\n")
            .map(collapse_whitespace)
            .filter(|p| !p.is_empty())
            .collect();
        Self {
            plain_text: collapse_whitespace(text),
            first_paragraph: paragraphs.first().cloned().unwrap_or_default(),
            paragraphs,
            ..Self::default()
        }
    }

    /// The source HTML this document was parsed from.
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Texts of elements emphasized with one of `colors`.
    ///
    /// See [`emphasized_texts`].
    pub fn emphasized_texts(&self, colors: &[String]) -> Vec<String> {
        emphasized_texts(&self.html, colors)
    }
}

/// Strip all markup, returning visible text only.
pub fn plain_text(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }
    visible_text(Html::parse_fragment(html).root_element())
}

/// Heading texts (levels 1–6) in document order, blank headings dropped.
pub fn headings(html: &str) -> Vec<String> {
    if html.trim().is_empty() {
        return Vec::new();
    }
    select_texts(&Html::parse_fragment(html), &HEADINGS)
}

/// Remove heading elements (tag and contents), leaving the rest of the HTML.
///
/// Each heading is replaced by a space so surrounding words do not merge.
/// This is a textual match on open/close tag pairs, not a parse: a heading
/// with no closing tag is left in place, even though [`headings`] recovers it
/// the way a browser would.
pub fn strip_headings(html: &str) -> String {
    HEADING_BLOCK.replace_all(html, " ").into_owned()
}

/// Text of the first non-empty paragraph that is not inside an `<h1>`.
pub fn first_paragraph(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }
    first_paragraph_of(&Html::parse_fragment(html))
}

/// Non-empty paragraph texts in document order.
pub fn paragraphs(html: &str) -> Vec<String> {
    if html.trim().is_empty() {
        return Vec::new();
    }
    select_texts(&Html::parse_fragment(html), &PARAGRAPHS)
}

/// All `<img>` elements with their alt text.
pub fn images(html: &str) -> Vec<Image> {
    if html.trim().is_empty() {
        return Vec::new();
    }
    images_of(&Html::parse_fragment(html))
}

/// All `<a href>` elements with their anchor text.
pub fn links(html: &str) -> Vec<Link> {
    if html.trim().is_empty() {
        return Vec::new();
    }
    links_of(&Html::parse_fragment(html))
}

/// Texts of elements whose inline style (or `<font color>`) sets one of the
/// given colors.
///
/// Only the `color` property counts; `background-color` and friends do not.
/// Values must equal a configured color after lower-casing and removing
/// whitespace, so `rgb(0, 0, 255)` matches `rgb(0,0,255)` but `#00ff00`
/// does not match `#00f`.
pub fn emphasized_texts(html: &str, colors: &[String]) -> Vec<String> {
    if html.trim().is_empty() || colors.is_empty() {
        return Vec::new();
    }
    let wanted: Vec<String> = colors.iter().map(|c| squash(c)).collect();
    let fragment = Html::parse_fragment(html);

    fragment
        .select(&STYLED)
        .filter(|el| {
            let element = el.value();
            let style_hit = element
                .attr("style")
                .and_then(inline_color)
                .is_some_and(|color| wanted.contains(&color));
            let font_hit = element.name() == "font"
                && element
                    .attr("color")
                    .is_some_and(|color| wanted.contains(&squash(color)));
            style_hit || font_hit
        })
        .map(visible_text)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Squashed value of the last `color` declaration in an inline style.
fn inline_color(style: &str) -> Option<String> {
    style
        .split(';')
        .filter_map(|declaration| declaration.split_once(':'))
        .filter(|(property, _)| property.trim().eq_ignore_ascii_case("color"))
        .map(|(_, value)| squash(value.trim().trim_end_matches("!important")))
        .next_back()
}

/// Lower-case and drop all whitespace.
fn squash(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Visible text under `element`, with block boundaries turned into spaces.
fn visible_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    push_text(element, &mut raw);
    collapse_whitespace(&raw)
}

fn push_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => {
                let name = el.name();
                if HIDDEN_ELEMENTS.contains(&name) {
                    continue;
                }
                let Some(child_el) = ElementRef::wrap(child) else {
                    continue;
                };
                let block = BLOCK_ELEMENTS.contains(&name);
                if block {
                    out.push(' ');
                }
                push_text(child_el, out);
                if block {
                    out.push(' ');
                }
            }
            _ => {}
        }
    }
}

fn select_texts(fragment: &Html, selector: &Selector) -> Vec<String> {
    fragment
        .select(selector)
        .map(visible_text)
        .filter(|t| !t.is_empty())
        .collect()
}

fn first_paragraph_of(fragment: &Html) -> String {
    fragment
        .select(&PARAGRAPHS)
        .filter(|p| {
            !p.ancestors().any(|node| {
                node.value()
                    .as_element()
                    .is_some_and(|el| el.name() == "h1")
            })
        })
        .map(visible_text)
        .find(|t| !t.is_empty())
        .unwrap_or_default()
}

fn images_of(fragment: &Html) -> Vec<Image> {
    fragment
        .select(&IMAGES)
        .map(|img| Image {
            alt: img.value().attr("alt").map(str::to_string),
        })
        .collect()
}

fn links_of(fragment: &Html) -> Vec<Link> {
    fragment
        .select(&LINKS)
        .map(|a| Link {
            href: a.value().attr("href").unwrap_or_default().to_string(),
            text: visible_text(a),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        <h1>Garden <em>Guide</em></h1>
        <p></p>
        <p>First <b>real</b> paragraph.</p>
        <h2>Soil</h2>
        <p>Second paragraph<br>with a break.</p>
        <img src="a.jpg" alt="a tidy garden">
        <img src="b.jpg">
        <a href="/soil">soil basics</a>
        <a>no href</a>
        <script>var hidden = 1;</script>
    "#;

    #[test]
    fn plain_text_strips_markup() {
        let text = plain_text(SAMPLE);
        assert!(text.starts_with("Garden Guide First real paragraph."));
        assert!(text.contains("Second paragraph with a break."));
        assert!(!text.contains('<'));
        assert!(!text.contains("hidden"));
    }

    #[test]
    fn block_boundaries_do_not_merge_words() {
        assert_eq!(plain_text("<p>one.</p><p>two</p>"), "one. two");
        assert_eq!(plain_text("<b>gar</b>den"), "garden");
    }

    #[test]
    fn headings_in_order() {
        assert_eq!(headings(SAMPLE), vec!["Garden Guide", "Soil"]);
        assert_eq!(
            headings("<h3 class='x'>Three</h3><h6>Six</h6><h2> </h2>"),
            vec!["Three", "Six"]
        );
    }

    #[test]
    fn strip_headings_removes_tag_and_contents() {
        let stripped = strip_headings("<h1 id='t'>Title</h1><p>Body</p><H2>Sub</H2>");
        assert!(!stripped.contains("Title"));
        assert!(!stripped.contains("Sub"));
        assert!(stripped.contains("<p>Body</p>"));
    }

    #[test]
    fn unclosed_heading_is_found_but_not_stripped() {
        let html = "<p>Body</p><h2>Unclosed heading<p>More body</p>";
        let found = headings(html);
        assert_eq!(found.len(), 1);
        assert!(found[0].starts_with("Unclosed heading"));
        assert_eq!(strip_headings(html), html);
    }

    #[test]
    fn strip_headings_leaves_header_tags() {
        let stripped = strip_headings("<header>Top</header><p>Body</p>");
        assert!(stripped.contains("Top"));
    }

    #[test]
    fn first_paragraph_skips_h1_and_empty() {
        assert_eq!(first_paragraph(SAMPLE), "First real paragraph.");
        assert_eq!(
            first_paragraph("<h1>Intro</h1><p>This article is about gardening tips.</p>"),
            "This article is about gardening tips."
        );
    }

    #[test]
    fn paragraphs_non_empty_only() {
        let paras = paragraphs(SAMPLE);
        assert_eq!(paras.len(), 2);
        assert_eq!(paras[1], "Second paragraph with a break.");
    }

    #[test]
    fn images_and_links() {
        let imgs = images(SAMPLE);
        assert_eq!(imgs.len(), 2);
        assert_eq!(imgs[0].alt.as_deref(), Some("a tidy garden"));
        assert!(imgs[1].alt.is_none());

        let anchors = links(SAMPLE);
        assert_eq!(anchors.len(), 1);
        assert_eq!(anchors[0].href, "/soil");
        assert_eq!(anchors[0].text, "soil basics");
    }

    #[test]
    fn emphasized_by_inline_color() {
        let colors: Vec<String> = ["blue", "rgb(0, 0, 255)", "#00f", "#0000ff"]
            .iter()
            .map(|c| (*c).to_string())
            .collect();
        let html = r##"<p>Plain <span style="color: Blue">compost</span>
            <span style="color:rgb(0,0,255)">mulch</span>
            <span style="color: red">weeds</span>
            <font color="#0000FF">seeds</font></p>"##;
        let texts = emphasized_texts(html, &colors);
        assert_eq!(texts, vec!["compost", "mulch", "seeds"]);
    }

    #[test]
    fn only_the_color_property_counts() {
        let colors: Vec<String> = ["blue", "#00f"].into_iter().map(str::to_string).collect();
        let html = r##"<p><span style="color:#00ff00">green</span>
            <span style="background-color: blue; color: white">boxed</span>
            <span style="color: lightblue">pale</span>
            <span style="font-weight: bold; COLOR: #00F !important">marked</span></p>"##;
        assert_eq!(emphasized_texts(html, &colors), vec!["marked"]);
    }

    #[test]
    fn malformed_html_is_tolerated() {
        let html = "<p>Unclosed <b>bold <h2>Heading<p>After";
        assert!(plain_text(html).contains("After"));
        assert_eq!(headings(html).len(), 1);
    }

    #[test]
    fn empty_input_yields_empty_outputs() {
        assert!(plain_text("").is_empty());
        assert!(headings("").is_empty());
        assert!(strip_headings("").is_empty());
        assert!(first_paragraph("").is_empty());
        assert!(paragraphs("").is_empty());
        assert!(images("").is_empty());
        assert!(links("").is_empty());
        assert!(emphasized_texts("", &["blue".to_string()]).is_empty());
        let doc = Document::parse("");
        assert!(doc.plain_text.is_empty());
        assert!(doc.headings.is_empty());
    }

    #[test]
    fn document_bundles_views() {
        let doc = Document::parse(SAMPLE);
        assert_eq!(doc.h1s, vec!["Garden Guide"]);
        assert_eq!(doc.first_paragraph, "First real paragraph.");
        assert_eq!(doc.images.len(), 2);
        assert_eq!(doc.links.len(), 1);
        assert_eq!(doc.html(), SAMPLE);
    }

    #[test]
    fn document_from_plain_text() {
        let doc = Document::from_plain_text("First block\nstill first.\n\nSecond block.");
        assert_eq!(doc.paragraphs.len(), 2);
        assert_eq!(doc.first_paragraph, "First block still first.");
        assert!(doc.headings.is_empty());
    }
}
