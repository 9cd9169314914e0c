use log::debug;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::emoji;
use crate::style::Style;

/// Maximum character gap between two list-item fragments for them to land
/// in the same rendered group.
const GROUP_SLACK: usize = 10;

static EMOJI_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r":([\w+-]+):").unwrap());
static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());
static H3: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^### (.*)$").unwrap());
static H2: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^## (.*)$").unwrap());
static H1: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^# (.*)$").unwrap());
static BULLET_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*\* (.*)$").unwrap());
static NUMBERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*\d+\. (.*)$").unwrap());
static CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());

/// Render lightweight markup to an HTML fragment using the default style.
pub fn render(text: &str) -> String {
    render_with_style(text, &Style::default())
}

/// Render lightweight markup to an HTML fragment.
///
/// An ordered sequence of whole-text rewrite passes; each pass operates on
/// the output of the previous one, so the ordering is part of the
/// contract. Unmatched or malformed tokens pass through as literal text.
/// The result is raw markup and is not sanitized; the sink must treat it
/// as trusted content.
pub fn render_with_style(text: &str, style: &Style) -> String {
    let text = substitute_emoji(text);
    let text = replace_paired(&text, &["**", "__"], "<strong>", "</strong>");
    let text = replace_paired(&text, &["*", "_"], "<em>", "</em>");
    let text = rewrite_links(&text, style);
    let text = rewrite_headers(&text, style);
    let text = rewrite_list_markers(&text, style);
    let text = rewrite_code(&text, style);
    let text = wrap_paragraphs(&text, style);
    group_list_items(&text, style)
}

/// Replace `:code:` tokens found in the emoji table; unknown codes stay
/// verbatim, colons included.
fn substitute_emoji(text: &str) -> String {
    EMOJI_TOKEN
        .replace_all(text, |caps: &Captures| match emoji::glyph(&caps[1]) {
            Some(glyph) => glyph.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Wrap delimited spans, requiring the closing delimiter to match the
/// opening one exactly (no mixing `**` with `__`).
///
/// Left-to-right scan: at each position the delimiters are tried in order,
/// and the nearest close on the same line wins. Spans may be empty and may
/// not cross a newline; an unclosed delimiter is literal text.
fn replace_paired(text: &str, delims: &[&str], open_tag: &str, close_tag: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    'scan: while i < text.len() {
        for delim in delims {
            if text[i..].starts_with(delim) {
                let body_start = i + delim.len();
                let line_end = text[body_start..]
                    .find('\n')
                    .map(|n| body_start + n)
                    .unwrap_or(text.len());
                if let Some(offset) = text[body_start..line_end].find(delim) {
                    let body_end = body_start + offset;
                    out.push_str(open_tag);
                    out.push_str(&text[body_start..body_end]);
                    out.push_str(close_tag);
                    i = body_end + delim.len();
                    continue 'scan;
                }
            }
        }

        let ch_len = text[i..]
            .chars()
            .next()
            .map(char::len_utf8)
            .unwrap_or(1);
        out.push_str(&text[i..i + ch_len]);
        i += ch_len;
    }

    out
}

/// `[label](url)` to an anchor; label and url are substituted literally.
fn rewrite_links(text: &str, style: &Style) -> String {
    LINK.replace_all(text, |caps: &Captures| {
        format!(
            "<a href=\"{}\" class=\"{}\">{}</a>",
            &caps[2], style.link, &caps[1]
        )
    })
    .into_owned()
}

/// Line-anchored headers, longest prefix first so `#` never matches
/// inside `##`.
fn rewrite_headers(text: &str, style: &Style) -> String {
    let text = H3.replace_all(text, |caps: &Captures| {
        format!("<h3 class=\"{}\">{}</h3>", style.h3, &caps[1])
    });
    let text = H2.replace_all(&text, |caps: &Captures| {
        format!("<h2 class=\"{}\">{}</h2>", style.h2, &caps[1])
    });
    H1.replace_all(&text, |caps: &Captures| {
        format!("<h1 class=\"{}\">{}</h1>", style.h1, &caps[1])
    })
    .into_owned()
}

/// Line-anchored `* text` and `<digits>. text` markers become list-item
/// fragments. Bulleted and numbered markers render identically here; the
/// ordinal is not preserved.
fn rewrite_list_markers(text: &str, style: &Style) -> String {
    let li = |caps: &Captures| format!("<li class=\"{}\">{}</li>", style.list_item, &caps[1]);
    let text = BULLET_ITEM.replace_all(text, li);
    NUMBERED_ITEM.replace_all(&text, li).into_owned()
}

fn rewrite_code(text: &str, style: &Style) -> String {
    CODE.replace_all(text, |caps: &Captures| {
        format!("<code class=\"{}\">{}</code>", style.code, &caps[1])
    })
    .into_owned()
}

/// Every double newline becomes a paragraph boundary, then the whole text
/// is wrapped in a single enclosing paragraph.
fn wrap_paragraphs(text: &str, style: &Style) -> String {
    let broken = text.replace("\n\n", &format!("</p><p class=\"{}\">", style.paragraph));
    format!("<p class=\"{}\">{}</p>", style.paragraph, broken)
}

/// Wrap consecutive runs of list-item fragments in a list container.
///
/// Fragments count as consecutive when the next one starts within
/// `GROUP_SLACK` characters of the previous one's end; gap text inside a
/// run is dropped, while text between and around runs passes through
/// unchanged. Without any fragments the text is returned as-is.
fn group_list_items(text: &str, style: &Style) -> String {
    let li_open = format!("<li class=\"{}\">", style.list_item);
    let fragments = find_list_fragments(text, &li_open);
    if fragments.is_empty() {
        return text.to_string();
    }

    let ul_open = format!("<ul class=\"{}\">", style.list);
    let mut out = String::with_capacity(text.len());
    let mut last_end = 0;
    let mut groups = 0;

    for (i, &(start, end)) in fragments.iter().enumerate() {
        let new_group = i == 0 || start > fragments[i - 1].1 + GROUP_SLACK;
        if new_group {
            if groups > 0 {
                out.push_str("</ul>");
            }
            out.push_str(&text[last_end..start]);
            out.push_str(&ul_open);
            groups += 1;
        }
        out.push_str(&text[start..end]);
        last_end = end;
    }

    out.push_str("</ul>");
    out.push_str(&text[last_end..]);

    debug!(
        "grouped {} list fragments into {} runs",
        fragments.len(),
        groups
    );
    out
}

/// Byte ranges of every `<li …>…</li>` fragment, non-overlapping, where
/// the close tag sits on the same line as the open tag.
fn find_list_fragments(text: &str, li_open: &str) -> Vec<(usize, usize)> {
    let mut fragments = Vec::new();
    let mut from = 0;

    while let Some(found) = text[from..].find(li_open) {
        let start = from + found;
        let content_start = start + li_open.len();
        let line_end = text[content_start..]
            .find('\n')
            .map(|n| content_start + n)
            .unwrap_or(text.len());
        match text[content_start..line_end].find("</li>") {
            Some(offset) => {
                let end = content_start + offset + "</li>".len();
                fragments.push((start, end));
                from = end;
            }
            None => from = content_start,
        }
    }

    fragments
}
