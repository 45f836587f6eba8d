use super::Normalizer;
use once_cell::sync::Lazy;
use regex::Regex;

static SPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t\u{00A0}]+").expect("space regex"));
static BLANK_LINE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("newline regex"));
static SPACE_BEFORE_PUNCT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" +([.!?،؛؟:»)\]}])").expect("punctuation regex"));

/// Normalizer for Persian text written with mixed Arabic and Persian code points.
#[derive(Debug, Clone)]
pub struct PersianNormalizer {
    persian_numbers: bool,
}

impl PersianNormalizer {
    /// Create a normalizer that also converts digits to Persian digits.
    pub fn new() -> Self {
        Self {
            persian_numbers: true,
        }
    }

    /// Toggle conversion of Latin and Arabic-Indic digits to Persian digits.
    pub fn with_persian_numbers(mut self, enabled: bool) -> Self {
        self.persian_numbers = enabled;
        self
    }

    /// Unify characters: Arabic letter variants, digits, quotes. Drops
    /// diacritics and kashida.
    pub fn refine_characters(&self, text: &str) -> String {
        let mut refined = String::with_capacity(text.len());

        for c in text.chars() {
            match c {
                'ك' => refined.push('ک'),
                'ي' | 'ى' => refined.push('ی'),
                '“' | '”' => refined.push('"'),
                // fathatan .. sukun
                '\u{064B}'..='\u{0652}' => {}
                // kashida
                '\u{0640}' => {}
                '0'..='9' if self.persian_numbers => refined.push(shift_digit(c, '0')),
                '٠'..='٩' if self.persian_numbers => refined.push(shift_digit(c, '٠')),
                '%' if self.persian_numbers => refined.push('٪'),
                _ => refined.push(c),
            }
        }

        refined
    }
}

impl Default for PersianNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer for PersianNormalizer {
    fn normalize(&self, text: &str) -> String {
        let text = self.refine_characters(text);
        let text = SPACE_RUNS.replace_all(&text, " ");
        let text = BLANK_LINE_RUNS.replace_all(&text, "\n\n");
        SPACE_BEFORE_PUNCT.replace_all(&text, "$1").into_owned()
    }
}

fn shift_digit(c: char, zero: char) -> char {
    let offset = c as u32 - zero as u32;
    char::from_u32('۰' as u32 + offset).unwrap_or(c)
}
