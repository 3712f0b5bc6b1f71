//! Markdown to HTML conversion using pulldown-cmark.
//!
//! Headings receive slug-based `id` anchors. Fenced code blocks are
//! stamped with the configured highlight theme pair and wrap flag as data
//! attributes; the stylesheet picks the palette for the active color
//! scheme.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd, html::push_html};

use crate::config::MarkdownSectionConfig;
use crate::utils::slug::slugify;

/// Options for markdown conversion
#[derive(Debug, Clone, Default)]
pub struct MarkdownOptions {
    /// Enable tables extension
    pub tables: bool,
    /// Enable footnotes extension
    pub footnotes: bool,
    /// Enable strikethrough extension
    pub strikethrough: bool,
    /// Enable task lists extension
    pub task_lists: bool,
    /// Enable heading attributes extension (e.g., `# Heading {#custom-id}`)
    pub heading_attributes: bool,
}

impl MarkdownOptions {
    /// Create options with all extensions enabled
    pub fn all() -> Self {
        Self {
            tables: true,
            footnotes: true,
            strikethrough: true,
            task_lists: true,
            heading_attributes: true,
        }
    }

    /// Convert to pulldown-cmark Options
    fn to_pulldown_options(&self) -> Options {
        let mut opts = Options::empty();
        if self.tables {
            opts.insert(Options::ENABLE_TABLES);
        }
        if self.footnotes {
            opts.insert(Options::ENABLE_FOOTNOTES);
        }
        if self.strikethrough {
            opts.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.task_lists {
            opts.insert(Options::ENABLE_TASKLISTS);
        }
        if self.heading_attributes {
            opts.insert(Options::ENABLE_HEADING_ATTRIBUTES);
        }
        opts
    }
}

/// Convert markdown to HTML.
pub fn from_markdown(
    markdown: &str,
    options: &MarkdownOptions,
    markdown_cfg: &MarkdownSectionConfig,
) -> String {
    let parser = Parser::new_ext(markdown, options.to_pulldown_options());

    let events = transform_events(parser, markdown_cfg);

    let mut html = String::with_capacity(markdown.len() * 2);
    push_html(&mut html, events.into_iter());
    html
}

/// Walk the event stream, rewriting code blocks and injecting heading ids.
fn transform_events<'a>(
    parser: Parser<'a>,
    markdown_cfg: &MarkdownSectionConfig,
) -> Vec<Event<'a>> {
    let mut events: Vec<Event<'a>> = Vec::new();
    let mut heading: Option<HeadingCapture<'a>> = None;

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(ref kind)) => {
                events.push(Event::Html(code_block_open(kind, markdown_cfg).into()));
            }
            Event::End(TagEnd::CodeBlock) => {
                events.push(Event::Html("</code></pre>".into()));
            }
            Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            }) => {
                // Buffer the heading to build a slug from its text;
                // an explicit `{#id}` attribute wins over the slug.
                heading = Some(HeadingCapture {
                    level,
                    id: id.map(|s| s.to_string()),
                    classes,
                    attrs,
                    text: String::new(),
                    inner: Vec::new(),
                });
            }
            Event::End(TagEnd::Heading(level)) => {
                match heading.take() {
                    Some(capture) if capture.level == level => {
                        capture.flush(&mut events);
                    }
                    other => {
                        heading = other;
                        events.push(Event::End(TagEnd::Heading(level)));
                    }
                }
            }
            Event::Text(ref text) if heading.is_some() => {
                if let Some(capture) = heading.as_mut() {
                    capture.text.push_str(text);
                    capture.inner.push(event);
                }
            }
            Event::Code(ref code) if heading.is_some() => {
                if let Some(capture) = heading.as_mut() {
                    capture.text.push_str(code);
                    capture.inner.push(event);
                }
            }
            _ if heading.is_some() => {
                if let Some(capture) = heading.as_mut() {
                    capture.inner.push(event);
                }
            }
            _ => events.push(event),
        }
    }

    events
}

/// Buffered heading contents, flushed as raw HTML with an id anchor.
struct HeadingCapture<'a> {
    level: pulldown_cmark::HeadingLevel,
    id: Option<String>,
    classes: Vec<pulldown_cmark::CowStr<'a>>,
    attrs: Vec<(pulldown_cmark::CowStr<'a>, Option<pulldown_cmark::CowStr<'a>>)>,
    text: String,
    inner: Vec<Event<'a>>,
}

impl<'a> HeadingCapture<'a> {
    fn flush(self, events: &mut Vec<Event<'a>>) {
        use pulldown_cmark::HeadingLevel;

        let level = match self.level {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
            HeadingLevel::H4 => 4,
            HeadingLevel::H5 => 5,
            HeadingLevel::H6 => 6,
        };
        let id = self
            .id
            .unwrap_or_else(|| slugify(&self.text));

        let mut open = format!("<h{}", level);
        if !id.is_empty() {
            open.push_str(&format!(" id=\"{}\"", id));
        }
        if !self.classes.is_empty() {
            let classes: Vec<&str> = self.classes.iter().map(|c| c.as_ref()).collect();
            open.push_str(&format!(" class=\"{}\"", classes.join(" ")));
        }
        for (key, value) in &self.attrs {
            match value {
                Some(value) => open.push_str(&format!(" {}=\"{}\"", key, value)),
                None => open.push_str(&format!(" {}", key)),
            }
        }
        open.push('>');

        events.push(Event::Html(open.into()));
        events.extend(self.inner);
        events.push(Event::Html(format!("</h{}>", level).into()));
    }
}

/// Opening tags for a fenced or indented code block.
fn code_block_open(kind: &CodeBlockKind, markdown_cfg: &MarkdownSectionConfig) -> String {
    let mut open = format!(
        "<pre class=\"code-block\" data-theme-light=\"{}\" data-theme-dark=\"{}\" data-wrap=\"{}\"><code",
        markdown_cfg.theme.light, markdown_cfg.theme.dark, markdown_cfg.wrap
    );

    if let CodeBlockKind::Fenced(info) = kind {
        // First token of the info string is the language
        let lang = info.split_whitespace().next().unwrap_or_default();
        if !lang.is_empty() {
            open.push_str(&format!(" class=\"language-{}\"", lang));
        }
    }

    open.push('>');
    open
}
