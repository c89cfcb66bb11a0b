//! Text helpers for outgoing Telegram messages: parse-mode escaping and splitting at the
//! Bot API length limit.

use teloxide::types::ParseMode;

/// Maximum length of a single Telegram text message.
pub const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

const MARKDOWN_V2_RESERVED: &[char] = &[
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!', '\\',
];

/// Escapes `&`, `<` and `>` for `ParseMode::Html`.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Backslash-escapes every MarkdownV2 reserved character.
pub fn escape_markdown_v2(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if MARKDOWN_V2_RESERVED.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Escapes user-provided text so it renders literally under `parse_mode`.
pub fn escape_for(parse_mode: Option<ParseMode>, text: &str) -> String {
    match parse_mode {
        None => text.to_string(),
        Some(ParseMode::Html) => escape_html(text),
        Some(ParseMode::MarkdownV2) => escape_markdown_v2(text),
        Some(_) => text.to_string(),
    }
}

/// Upper bound on the length of an HTML entity such as `&amp;`.
const MAX_ENTITY_LEN: usize = 10;

/// Byte index to cut `window` at without splitting an HTML entity or leaving a dangling
/// MarkdownV2 escape backslash at the end of the chunk.
fn markup_safe_cut(window: &str) -> usize {
    let mut cut = window.len();
    if let Some(amp) = window.rfind('&') {
        let tail = &window[amp..];
        if amp > 0
            && tail.len() <= MAX_ENTITY_LEN
            && !tail.contains(';')
            && !tail.contains(char::is_whitespace)
        {
            cut = amp;
        }
    }
    let trailing = window[..cut].chars().rev().take_while(|&c| c == '\\').count();
    if trailing % 2 == 1 && cut > 1 {
        cut -= 1;
    }
    cut
}

/// Splits `text` into chunks of at most `limit` chars, preferring to cut at the last newline
/// inside each window (the newline itself is dropped). A hard cut never lands inside an HTML
/// entity or right after an unpaired escape backslash. Empty text yields no chunks.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    let mut chunks = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let window_end = match rest.char_indices().nth(limit) {
            Some((idx, _)) => idx,
            None => {
                chunks.push(rest.to_string());
                break;
            }
        };
        let window = &rest[..window_end];
        match window.rfind('\n') {
            Some(pos) if pos > 0 => {
                chunks.push(window[..pos].to_string());
                rest = &rest[pos + 1..];
            }
            _ => {
                let cut = markup_safe_cut(window);
                chunks.push(window[..cut].to_string());
                rest = &rest[cut..];
            }
        }
    }

    chunks
}
