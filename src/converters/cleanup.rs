//! Post-processing for Markdown produced by OCR or LLM backends: table
//! repair, math delimiters and theorem labels.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Theorem-like labels ending in a colon
    static ref RE_THEOREM_LABEL: Regex = Regex::new(
        r"(?i)(Theorem\s*\d*\.?.*?:|Lemma\s*\d*\.?.*?:|Corollary\s*\d*\.?.*?:|Proof\s*:|Definition\s*:|Proposition\s*:|Remark\s*:)"
    )
    .unwrap();

    /// `#` at the start of a table cell
    static ref RE_LEADING_HASH: Regex = Regex::new(r"^#").unwrap();

    /// Simple equality such as `x = 2y + 1`, up to the next `.`, `,`, `;` or newline
    static ref RE_INLINE_EQUATION: Regex = Regex::new(r"\b[a-zA-Z0-9_]+\s*=\s*[^.,;\n]+").unwrap();

    /// A whole line opening with `\`, `(` or `[` and closing with `\`, `)` or `]`
    static ref RE_DISPLAY_LINE: Regex = Regex::new(r"\n([ \t]*[\\(\[].+[\\)\]])\n").unwrap();
}

/// Normalize a Markdown pipe table so every row has the header's column count.
///
/// The header line is kept verbatim. The second line is assumed to be a
/// separator and is replaced by `|---|...|`. Body rows are padded with empty
/// cells or truncated, and a leading `#` in a cell becomes `No.`.
///
/// # Arguments
///
/// * `table_md` - Raw Markdown table, one row per line
///
/// # Returns
///
/// The cleaned table, or the input unchanged if it has fewer than two
/// non-blank lines.
///
/// # Examples
///
/// ```
/// use ocr_markdown::converters::cleanup::clean_markdown_table;
///
/// let raw = "| # | Name | Age |\n|-|-|\n| #1 | Ali |";
/// assert_eq!(
///     clean_markdown_table(raw),
///     "| # | Name | Age |\n|---|---|---|\n| No.1 | Ali |  |"
/// );
/// ```
pub fn clean_markdown_table(table_md: &str) -> String {
    let lines: Vec<&str> = table_md
        .trim()
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.len() < 2 {
        return table_md.to_string();
    }

    let header = lines[0];
    let num_cols = header.matches('|').count().saturating_sub(1);

    let mut cleaned = Vec::with_capacity(lines.len());
    cleaned.push(header.to_string());
    cleaned.push(format!("|{}|", vec!["---"; num_cols].join("|")));

    for line in &lines[2..] {
        let mut cells: Vec<String> = line
            .trim_matches('|')
            .split('|')
            .map(|cell| RE_LEADING_HASH.replace(cell.trim(), "No.").into_owned())
            .collect();
        cells.resize(num_cols, String::new());
        cleaned.push(format!("| {} |", cells.join(" | ")));
    }

    cleaned.join("\n")
}

/// Wrap math in Markdown math delimiters.
///
/// Inline equalities (`name = expr`, stopping at `.`, `,`, `;` or a newline)
/// become `$name = expr$`, unless a `$` sits right before them. Lines that
/// open with `\(` / `\[` and close with `\)` / `\]` become `$$...$$`, unless the
/// neighbouring lines already start or end with `$`.
///
/// # Examples
///
/// ```
/// use ocr_markdown::converters::cleanup::highlight_formulas;
///
/// assert_eq!(highlight_formulas("Let x = 2y + 1."), "Let $x = 2y + 1$.");
/// assert_eq!(highlight_formulas("Let $x = 2$."), "Let $x = 2$.");
/// ```
pub fn highlight_formulas(md: &str) -> String {
    let inline = wrap_unless_dollar_adjacent(md, &RE_INLINE_EQUATION, 0, |m, out| {
        out.push('$');
        out.push_str(m);
        out.push('$');
    });
    wrap_unless_dollar_adjacent(&inline, &RE_DISPLAY_LINE, 1, |m, out| {
        out.push_str("\n$$");
        out.push_str(&m[1..m.len() - 1]);
        out.push_str("$$\n");
    })
}

/// Replace every match of `re` in `text` via `wrap`, skipping matches that have
/// a `$` just before them or, when `check_after` is 1, just after them.
///
/// A skipped match is retried one character later, mirroring how a regex
/// engine with lookaround would move on.
fn wrap_unless_dollar_adjacent(
    text: &str,
    re: &Regex,
    check_after: usize,
    wrap: impl Fn(&str, &mut String),
) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut copied = 0;
    let mut pos = 0;

    while let Some(m) = re.find_at(text, pos) {
        let before = text[..m.start()].chars().next_back();
        let after = text[m.end()..].chars().next();
        let blocked = before == Some('$') || (check_after == 1 && after == Some('$'));
        if blocked {
            pos = m.start() + text[m.start()..].chars().next().map_or(1, char::len_utf8);
            continue;
        }
        out.push_str(&text[copied..m.start()]);
        wrap(m.as_str(), &mut out);
        copied = m.end();
        pos = m.end();
    }

    out.push_str(&text[copied..]);
    out
}

/// Math delimiters first, then bold theorem-like labels.
pub fn highlight_formulas_and_theorems(md: &str) -> String {
    bold_theorem_labels(&highlight_formulas(md))
}

/// Bold theorem-like labels (`Theorem 2:`, `Proof:`, `Remark:` and similar).
///
/// Matching is case-insensitive. Numbered labels (`Theorem`, `Lemma`,
/// `Corollary`) extend to the first colon on the line.
pub fn bold_theorem_labels(md: &str) -> String {
    RE_THEOREM_LABEL.replace_all(md, "**$1**").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_input_unchanged() {
        assert_eq!(clean_markdown_table("| a | b |"), "| a | b |");
        assert_eq!(clean_markdown_table(""), "");
        assert_eq!(clean_markdown_table("  \n\n"), "  \n\n");
    }

    #[test]
    fn test_separator_rewritten() {
        let cleaned = clean_markdown_table("| a | b |\n| --- |");
        assert_eq!(cleaned, "| a | b |\n|---|---|");
    }

    #[test]
    fn test_rows_truncated_to_header() {
        let cleaned = clean_markdown_table("| a | b |\n|---|---|\n| 1 | 2 | 3 |");
        assert_eq!(cleaned, "| a | b |\n|---|---|\n| 1 | 2 |");
    }

    #[test]
    fn test_blank_lines_ignored() {
        let cleaned = clean_markdown_table("\n| a | b |\n\n|---|---|\n\n| 1 | 2 |\n");
        assert_eq!(cleaned, "| a | b |\n|---|---|\n| 1 | 2 |");
    }

    #[test]
    fn test_bold_theorem_labels() {
        assert_eq!(bold_theorem_labels("Theorem 1: x > 0"), "**Theorem 1:** x > 0");
        assert_eq!(bold_theorem_labels("proof: trivial"), "**proof:** trivial");
        assert_eq!(bold_theorem_labels("Lemma 2.3 (Zorn): every"), "**Lemma 2.3 (Zorn):** every");
        assert_eq!(bold_theorem_labels("no labels here"), "no labels here");
    }

    #[test]
    fn test_inline_equations_wrapped() {
        assert_eq!(highlight_formulas("where a = b + c, and"), "where $a = b + c$, and");
        assert_eq!(highlight_formulas("f_1=3; g=4"), "$f_1=3$; $g=4$");
        assert_eq!(highlight_formulas("no math here"), "no math here");
    }

    #[test]
    fn test_already_wrapped_inline_is_left_alone() {
        assert_eq!(highlight_formulas("so $x = 1$ holds"), "so $x = 1$ holds");
        // Rejected at `a`, the scan resumes and finds `b = c`
        assert_eq!(highlight_formulas("$a = b = c"), "$a = $b = c$");
    }

    #[test]
    fn test_display_lines_wrapped() {
        let md = "Consider\n\\[ \\int_0^1 f \\]\nfor all f";
        assert_eq!(
            highlight_formulas(md),
            "Consider\n$$\\[ \\int_0^1 f \\]$$\nfor all f"
        );
        assert_eq!(highlight_formulas("a\n(1)\nb"), "a\n$$(1)$$\nb");
    }

    #[test]
    fn test_display_line_next_to_dollar_is_left_alone() {
        assert_eq!(highlight_formulas("$\n\\[ y \\]\nb"), "$\n\\[ y \\]\nb");
        assert_eq!(highlight_formulas("a\n\\[ y \\]\n$$"), "a\n\\[ y \\]\n$$");
    }

    #[test]
    fn test_formulas_and_theorems_combined() {
        let md = "Theorem 2: If n = 2k then n is even.";
        assert_eq!(
            highlight_formulas_and_theorems(md),
            "**Theorem 2:** If $n = 2k then n is even$."
        );
    }

    #[test]
    fn test_bold_multiple_labels() {
        let md = "Definition: a set.\nRemark: note.";
        assert_eq!(bold_theorem_labels(md), "**Definition:** a set.\n**Remark:** note.");
    }
}
