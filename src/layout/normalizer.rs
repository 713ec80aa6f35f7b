//! Token normalization for OCR artifacts in URLs and email addresses.
//!
//! OCR engines commonly misread `//` as `II`, split domains at dots, and
//! replace separators with spaces or underscores. [`normalize`] applies a fixed
//! pipeline of corrections, in order, to the text of a single fragment.
//!
//! The pipeline assumes whitespace and underscores inside a fragment stand for
//! broken separators, so ordinary prose is rewritten too (`"two words"` becomes
//! `"two.words"`). Layout reconstruction can switch it off through
//! [`LayoutConfig::normalize_text`](crate::config::LayoutConfig::normalize_text).

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `http`/`https` followed by misread slashes
    static ref RE_SCHEME: Regex = Regex::new(r"(?i)https?I+").unwrap();

    /// Any case permutation of `www`
    static ref RE_WWW: Regex = Regex::new(r"(?i)www").unwrap();

    /// `com` with separator runs on both sides
    static ref RE_COM_INFIX: Regex = Regex::new(r"[\s_]+com[\s_]+").unwrap();

    /// `com` preceded by a separator run
    static ref RE_COM_SUFFIX: Regex = Regex::new(r"[\s_]+com").unwrap();

    /// Remaining whitespace/underscore runs
    static ref RE_SEPARATOR_RUN: Regex = Regex::new(r"[\s_]+").unwrap();

    /// Two or more literal dots
    static ref RE_MULTI_DOT: Regex = Regex::new(r"\.\.+").unwrap();

    /// Whitespace around `@`
    static ref RE_AT: Regex = Regex::new(r"\s*@\s*").unwrap();

    /// Whitespace around `.`
    static ref RE_DOT: Regex = Regex::new(r"\s*\.\s*").unwrap();
}

/// Normalize the raw text of one OCR fragment.
///
/// Steps, in order:
/// 1. `https?` + one or more `I` (case-insensitive) → `https://`
/// 2. any case permutation of `www` → `www`
/// 3. separator runs around `com` → `.com.`, then separator run + `com` → `.com`
/// 4. remaining whitespace/underscore runs → `.`
/// 5. `,` or `;` between two word characters → `.`
/// 6. runs of dots → `.`
/// 7. whitespace around `@` removed
/// 8. whitespace around `.` removed
///
/// Never fails; the empty string maps to itself.
///
/// # Examples
///
/// ```
/// use ocr_markdown::layout::normalizer::normalize;
///
/// assert_eq!(normalize("wwW example  com"), "www.example.com");
/// assert_eq!(normalize("httpsIIwww site com"), "https://www.site.com");
/// ```
pub fn normalize(raw_text: &str) -> String {
    let text = RE_SCHEME.replace_all(raw_text, "https://");
    let text = RE_WWW.replace_all(&text, "www");
    let text = RE_COM_INFIX.replace_all(&text, ".com.");
    let text = RE_COM_SUFFIX.replace_all(&text, ".com");
    let text = RE_SEPARATOR_RUN.replace_all(&text, ".");
    let text = replace_inner_punctuation(&text);
    let text = RE_MULTI_DOT.replace_all(&text, ".");
    let text = RE_AT.replace_all(&text, "@");
    let text = RE_DOT.replace_all(&text, ".");
    text.into_owned()
}

/// Replace `,` and `;` with `.` when both neighbours are word characters.
///
/// Neighbours are read from the input, so in `a,;b` neither mark qualifies.
fn replace_inner_punctuation(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());

    for (i, &c) in chars.iter().enumerate() {
        let between_words = matches!(c, ',' | ';')
            && i > 0
            && is_word_char(chars[i - 1])
            && chars.get(i + 1).copied().is_some_and(is_word_char);

        out.push(if between_words { '.' } else { c });
    }

    out
}

/// Unicode word character: letter, digit, or underscore.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
