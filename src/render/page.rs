//! Minimal page shell around rendered markdown.
//!
//! The shell carries the site title, a nav built from the route table, and
//! entry dates in `DD.MM.YYYY`. Layout and styling beyond this skeleton
//! are authored content, not generator output.

use std::borrow::Cow;

use crate::config::SiteConfig;
use crate::content::ContentEntry;
use crate::core::Route;

/// Render a full entry page.
pub fn render_entry_page(entry: &ContentEntry, body_html: &str, config: &SiteConfig) -> String {
    let title = entry.title();
    let date_line = entry
        .date()
        .map(|d| {
            format!(
                "<time datetime=\"{}\">{}</time>",
                d.to_rfc3339(),
                d.format_display()
            )
        })
        .unwrap_or_default();
    let description = entry
        .meta
        .description
        .as_deref()
        .map(|d| format!("<meta name=\"description\" content=\"{}\">", escape_html(d)))
        .unwrap_or_default();

    page_shell(
        config,
        &format!("{} | {}", title, config.site.info.title),
        &description,
        &format!(
            "<article>\n<h1>{}</h1>\n{}\n{}\n</article>",
            escape_html(title),
            date_line,
            body_html
        ),
    )
}

/// Render the blog index page listing published entries newest-first.
pub fn render_index_page<'a>(
    entries: impl Iterator<Item = &'a ContentEntry>,
    config: &SiteConfig,
) -> String {
    let mut items = String::new();
    for entry in entries {
        let date = entry
            .date()
            .map(|d| format!(" <time datetime=\"{}\">{}</time>", d.to_rfc3339(), d.format_display()))
            .unwrap_or_default();
        items.push_str(&format!(
            "<li><a href=\"{}\">{}</a>{}</li>\n",
            entry.permalink.to_encoded(),
            escape_html(entry.title()),
            date
        ));
    }

    page_shell(
        config,
        &format!("blog | {}", config.site.info.title),
        "",
        &format!("<h1>blog</h1>\n<ul class=\"entries\">\n{}</ul>", items),
    )
}

/// Shared document skeleton: head, nav from the route table, main content.
fn page_shell(config: &SiteConfig, title: &str, head_extra: &str, main: &str) -> String {
    let mut nav = String::new();
    for route in Route::ALL {
        nav.push_str(&format!(
            "<a href=\"{}\">{}</a>\n",
            route.path(),
            route.label()
        ));
    }

    format!(
        "<!doctype html>\n<html lang=\"{lang}\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n{head_extra}</head>\n<body>\n<header>\n<nav>\n{nav}</nav>\n\
         </header>\n<main>\n{main}\n</main>\n</body>\n</html>\n",
        lang = config.site.info.language,
        title = escape_html(title),
        head_extra = head_extra,
        nav = nav,
        main = main,
    )
}

/// Escape text for HTML element and attribute content.
pub fn escape_html(s: &str) -> Cow<'_, str> {
    // Fast path: check if escaping is needed
    if !s.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;"),
    )
}
