//! Lightweight language identification for summary prompts.
//!
//! Only the languages the OCR pipeline targets are distinguished: Arabic by
//! script, French and English by accented letters and common function words.

/// Language used when the text has no letters to judge by.
pub const DEFAULT_LANGUAGE: &str = "ar";

/// Minimum share of Arabic-script letters for the text to count as Arabic.
const ARABIC_RATIO: f32 = 0.2;

const FRENCH_WORDS: &[&str] = &[
    "le", "la", "les", "des", "du", "une", "est", "et", "dans", "pour", "que", "qui", "sur",
    "pas", "avec", "au", "aux", "ce", "cette", "sont",
];

const ENGLISH_WORDS: &[&str] = &[
    "the", "and", "is", "of", "to", "in", "that", "for", "with", "this", "are", "on", "as",
    "be", "by", "it", "an", "was", "from", "or",
];

/// Detect the language of `text`, falling back to [`DEFAULT_LANGUAGE`].
///
/// # Examples
///
/// ```
/// use ocr_markdown::summary::detect_language;
///
/// assert_eq!(detect_language("مقدمة في الرياضيات"), "ar");
/// assert_eq!(detect_language("The theorem is proved in the next section."), "en");
/// assert_eq!(detect_language("La démonstration est dans le chapitre suivant."), "fr");
/// assert_eq!(detect_language("12 + 7 = 19"), "ar");
/// ```
pub fn detect_language(text: &str) -> &'static str {
    detect_language_or(text, DEFAULT_LANGUAGE)
}

/// Detect the language of `text`, returning `default` when undecidable.
pub fn detect_language_or(text: &str, default: &'static str) -> &'static str {
    let letters = text.chars().filter(|c| c.is_alphabetic()).count();
    if letters == 0 {
        return default;
    }

    let arabic = text.chars().filter(|c| is_arabic(*c)).count();
    if arabic as f32 / letters as f32 > ARABIC_RATIO {
        return "ar";
    }

    let latin = text.chars().filter(|c| c.is_alphabetic() && is_latin(*c)).count();
    if latin == 0 {
        return default;
    }

    let mut french = text.chars().filter(|c| is_french_accent(*c)).count();
    let mut english = 0;
    for word in text
        .split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
    {
        if FRENCH_WORDS.contains(&word.as_str()) {
            french += 1;
        }
        if ENGLISH_WORDS.contains(&word.as_str()) {
            english += 1;
        }
    }

    if french > english {
        "fr"
    } else {
        "en"
    }
}

fn is_arabic(c: char) -> bool {
    matches!(
        c as u32,
        0x0600..=0x06FF     // Arabic
        | 0x0750..=0x077F   // Arabic Supplement
        | 0x08A0..=0x08FF   // Arabic Extended-A
        | 0xFB50..=0xFDFF   // Presentation Forms-A
        | 0xFE70..=0xFEFF   // Presentation Forms-B
    )
}

fn is_latin(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c as u32, 0x00C0..=0x024F)
}

fn is_french_accent(c: char) -> bool {
    matches!(
        c.to_lowercase().next().unwrap_or(c),
        'à' | 'â' | 'ç' | 'é' | 'è' | 'ê' | 'ë' | 'î' | 'ï' | 'ô' | 'û' | 'ù' | 'ü' | 'ÿ' | 'œ' | 'æ'
    )
}
