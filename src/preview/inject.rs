//! Tagged `<style>`/`<script>` injection into an entry document.
//!
//! Tag lookups are ASCII case-insensitive. They run against a lowercased copy of the
//! document, which has the same byte offsets as the original.

use memchr::memmem;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StyleAnchor {
    /// Byte offset of `</head>`.
    HeadClose(usize),
    /// Byte offset just past the `<head ...>` open tag.
    HeadOpen(usize),
    /// Byte offset just past the `<html ...>` open tag; a `<head>` is synthesized there.
    HtmlOpen(usize),
    /// No usable tag; a `<head>` is prepended.
    Start,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScriptAnchor {
    /// Byte offset of the last `</body>`.
    BodyClose(usize),
    End,
}

pub fn style_anchor(html: &str) -> StyleAnchor {
    let lower = html.to_ascii_lowercase();
    let bytes = lower.as_bytes();

    if let Some(at) = memmem::find(bytes, b"</head>") {
        StyleAnchor::HeadClose(at)
    } else if let Some(at) = find_open_tag_end(bytes, b"head") {
        StyleAnchor::HeadOpen(at)
    } else if let Some(at) = find_open_tag_end(bytes, b"html") {
        StyleAnchor::HtmlOpen(at)
    } else {
        StyleAnchor::Start
    }
}

pub fn script_anchor(html: &str) -> ScriptAnchor {
    let lower = html.to_ascii_lowercase();
    match memmem::rfind(lower.as_bytes(), b"</body>") {
        Some(at) => ScriptAnchor::BodyClose(at),
        None => ScriptAnchor::End,
    }
}

/// Inserts style and script blocks into `html`.
///
/// Both anchors are located in the entry document itself, so tag-like text inside the
/// injected blocks never moves the other anchor.
pub fn inject(html: &str, styles: &str, scripts: &str) -> String {
    let mut edits: Vec<(usize, String)> = [style_edit(html, styles), script_edit(html, scripts)]
        .into_iter()
        .flatten()
        .collect();
    // stable: on equal offsets the styles stay first
    edits.sort_by_key(|(at, _)| *at);

    let mut out = String::with_capacity(html.len() + styles.len() + scripts.len() + 13);
    let mut last = 0;
    for (at, insert) in &edits {
        out.push_str(&html[last..*at]);
        out.push_str(insert);
        last = *at;
    }
    out.push_str(&html[last..]);
    out
}

pub fn inject_styles(html: &str, blocks: &str) -> String {
    inject(html, blocks, "")
}

pub fn inject_scripts(html: &str, blocks: &str) -> String {
    inject(html, "", blocks)
}

fn style_edit(html: &str, blocks: &str) -> Option<(usize, String)> {
    if blocks.is_empty() {
        return None;
    }
    Some(match style_anchor(html) {
        StyleAnchor::HeadClose(at) | StyleAnchor::HeadOpen(at) => (at, blocks.to_string()),
        StyleAnchor::HtmlOpen(at) => (at, format!("<head>{blocks}</head>")),
        StyleAnchor::Start => (0, format!("<head>{blocks}</head>")),
    })
}

fn script_edit(html: &str, blocks: &str) -> Option<(usize, String)> {
    if blocks.is_empty() {
        return None;
    }
    Some(match script_anchor(html) {
        ScriptAnchor::BodyClose(at) => (at, blocks.to_string()),
        ScriptAnchor::End => (html.len(), blocks.to_string()),
    })
}

pub fn style_block(name: &str, content: &str) -> String {
    format!(
        "<style data-file=\"{}\">{}</style>",
        escape_attr(name),
        neutralize_close_tag(content, "style")
    )
}

pub fn script_block(name: &str, content: &str) -> String {
    format!(
        "<script data-file=\"{}\">{}</script>",
        escape_attr(name),
        neutralize_close_tag(content, "script")
    )
}

/// Offset just past the first `<tag>` / `<tag attr...>`; `<header>` does not match `head`.
fn find_open_tag_end(lower: &[u8], tag: &[u8]) -> Option<usize> {
    let mut needle = Vec::with_capacity(tag.len() + 1);
    needle.push(b'<');
    needle.extend_from_slice(tag);

    for start in memmem::find_iter(lower, &needle) {
        let after = start + needle.len();
        match lower.get(after) {
            Some(b'>') => return Some(after + 1),
            Some(b) if b.is_ascii_whitespace() || *b == b'/' => {
                let close = memchr::memchr(b'>', &lower[after..])?;
                return Some(after + close + 1);
            }
            _ => continue,
        }
    }
    None
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// `</script` inside a script body would end the block early; write it as `<\/script`.
fn neutralize_close_tag(content: &str, tag: &str) -> String {
    let needle = format!("</{tag}");
    let lower = content.to_ascii_lowercase();
    let mut out = String::with_capacity(content.len());
    let mut last = 0;
    for at in memmem::find_iter(lower.as_bytes(), needle.as_bytes()) {
        out.push_str(&content[last..at]);
        out.push_str("<\\/");
        last = at + 2;
    }
    out.push_str(&content[last..]);
    out
}

#[cfg(test)]
#[path = "../../tests/unit/preview/inject.rs"]
mod tests;
