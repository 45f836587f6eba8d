use super::Reshaper;
use once_cell::sync::Lazy;
use std::collections::HashMap;

const ZWNJ: char = '\u{200C}';
const ZWJ: char = '\u{200D}';
const TATWEEL: char = '\u{0640}';
const LAM: char = '\u{0644}';

/// Presentation forms per letter: isolated, final, initial, medial.
/// Right-joining letters have no initial or medial form (0).
const LETTER_FORMS: &[(char, [u32; 4])] = &[
    ('\u{0621}', [0xFE80, 0, 0, 0]),
    ('\u{0622}', [0xFE81, 0xFE82, 0, 0]),
    ('\u{0623}', [0xFE83, 0xFE84, 0, 0]),
    ('\u{0624}', [0xFE85, 0xFE86, 0, 0]),
    ('\u{0625}', [0xFE87, 0xFE88, 0, 0]),
    ('\u{0626}', [0xFE89, 0xFE8A, 0xFE8B, 0xFE8C]),
    ('\u{0627}', [0xFE8D, 0xFE8E, 0, 0]),
    ('\u{0628}', [0xFE8F, 0xFE90, 0xFE91, 0xFE92]),
    ('\u{0629}', [0xFE93, 0xFE94, 0, 0]),
    ('\u{062A}', [0xFE95, 0xFE96, 0xFE97, 0xFE98]),
    ('\u{062B}', [0xFE99, 0xFE9A, 0xFE9B, 0xFE9C]),
    ('\u{062C}', [0xFE9D, 0xFE9E, 0xFE9F, 0xFEA0]),
    ('\u{062D}', [0xFEA1, 0xFEA2, 0xFEA3, 0xFEA4]),
    ('\u{062E}', [0xFEA5, 0xFEA6, 0xFEA7, 0xFEA8]),
    ('\u{062F}', [0xFEA9, 0xFEAA, 0, 0]),
    ('\u{0630}', [0xFEAB, 0xFEAC, 0, 0]),
    ('\u{0631}', [0xFEAD, 0xFEAE, 0, 0]),
    ('\u{0632}', [0xFEAF, 0xFEB0, 0, 0]),
    ('\u{0633}', [0xFEB1, 0xFEB2, 0xFEB3, 0xFEB4]),
    ('\u{0634}', [0xFEB5, 0xFEB6, 0xFEB7, 0xFEB8]),
    ('\u{0635}', [0xFEB9, 0xFEBA, 0xFEBB, 0xFEBC]),
    ('\u{0636}', [0xFEBD, 0xFEBE, 0xFEBF, 0xFEC0]),
    ('\u{0637}', [0xFEC1, 0xFEC2, 0xFEC3, 0xFEC4]),
    ('\u{0638}', [0xFEC5, 0xFEC6, 0xFEC7, 0xFEC8]),
    ('\u{0639}', [0xFEC9, 0xFECA, 0xFECB, 0xFECC]),
    ('\u{063A}', [0xFECD, 0xFECE, 0xFECF, 0xFED0]),
    ('\u{0641}', [0xFED1, 0xFED2, 0xFED3, 0xFED4]),
    ('\u{0642}', [0xFED5, 0xFED6, 0xFED7, 0xFED8]),
    ('\u{0643}', [0xFED9, 0xFEDA, 0xFEDB, 0xFEDC]),
    ('\u{0644}', [0xFEDD, 0xFEDE, 0xFEDF, 0xFEE0]),
    ('\u{0645}', [0xFEE1, 0xFEE2, 0xFEE3, 0xFEE4]),
    ('\u{0646}', [0xFEE5, 0xFEE6, 0xFEE7, 0xFEE8]),
    ('\u{0647}', [0xFEE9, 0xFEEA, 0xFEEB, 0xFEEC]),
    ('\u{0648}', [0xFEED, 0xFEEE, 0, 0]),
    ('\u{0649}', [0xFEEF, 0xFEF0, 0, 0]),
    ('\u{064A}', [0xFEF1, 0xFEF2, 0xFEF3, 0xFEF4]),
    // Persian letters
    ('\u{067E}', [0xFB56, 0xFB57, 0xFB58, 0xFB59]),
    ('\u{0686}', [0xFB7A, 0xFB7B, 0xFB7C, 0xFB7D]),
    ('\u{0698}', [0xFB8A, 0xFB8B, 0, 0]),
    ('\u{06A9}', [0xFB8E, 0xFB8F, 0xFB90, 0xFB91]),
    ('\u{06AF}', [0xFB92, 0xFB93, 0xFB94, 0xFB95]),
    ('\u{06CC}', [0xFBFC, 0xFBFD, 0xFBFE, 0xFBFF]),
];

/// Lam-alef ligatures: alef variant, isolated, final.
const LAM_ALEF: &[(char, u32, u32)] = &[
    ('\u{0622}', 0xFEF5, 0xFEF6),
    ('\u{0623}', 0xFEF7, 0xFEF8),
    ('\u{0625}', 0xFEF9, 0xFEFA),
    ('\u{0627}', 0xFEFB, 0xFEFC),
];

static FORMS: Lazy<HashMap<char, Forms>> = Lazy::new(|| {
    LETTER_FORMS
        .iter()
        .map(|(letter, codes)| (*letter, Forms::from_codes(*letter, codes)))
        .collect()
});

#[derive(Debug, Clone, Copy)]
struct Forms {
    isolated: char,
    final_: char,
    has_final: bool,
    initial: Option<char>,
    medial: Option<char>,
}

impl Forms {
    fn from_codes(letter: char, codes: &[u32; 4]) -> Self {
        let form = |code: u32| {
            if code == 0 {
                None
            } else {
                char::from_u32(code)
            }
        };
        let isolated = form(codes[0]).unwrap_or(letter);
        Self {
            isolated,
            final_: form(codes[1]).unwrap_or(isolated),
            has_final: codes[1] != 0,
            initial: form(codes[2]),
            medial: form(codes[3]),
        }
    }

    fn joins_forward(&self) -> bool {
        self.initial.is_some()
    }

    /// Hamza has no final form and never takes a join from its neighbour.
    fn joins_backward(&self) -> bool {
        self.has_final
    }

    fn pick(&self, joined_before: bool, joined_after: bool) -> char {
        match (joined_before, joined_after) {
            (true, true) => self.medial.unwrap_or(self.final_),
            (true, false) => self.final_,
            (false, true) => self.initial.unwrap_or(self.isolated),
            (false, false) => self.isolated,
        }
    }
}

/// Contextual shaper turning Arabic and Persian letters into their
/// presentation forms so renderers without a shaping engine join glyphs.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArabicReshaper;

impl ArabicReshaper {
    /// Create a new reshaper.
    pub fn new() -> Self {
        Self
    }
}

impl Reshaper for ArabicReshaper {
    fn reshape(&self, text: &str) -> String {
        let chars: Vec<char> = text.chars().collect();
        let mut shaped = String::with_capacity(text.len());
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            let Some(forms) = FORMS.get(&c) else {
                shaped.push(c);
                i += 1;
                continue;
            };

            let joined_before = previous_joins_forward(&chars, i);

            if c == LAM {
                if let Some((isolated, final_)) = chars.get(i + 1).and_then(|next| lam_alef(*next))
                {
                    shaped.push(if joined_before { final_ } else { isolated });
                    i += 2;
                    continue;
                }
            }

            let joined_after = forms.joins_forward() && next_accepts_join(&chars, i);
            shaped.push(forms.pick(joined_before, joined_after));
            i += 1;
        }

        shaped
    }
}

fn is_transparent(c: char) -> bool {
    matches!(c, '\u{064B}'..='\u{065F}' | '\u{0670}')
}

fn previous_joins_forward(chars: &[char], index: usize) -> bool {
    chars[..index]
        .iter()
        .rev()
        .find(|c| !is_transparent(**c))
        .map(|c| *c == TATWEEL || *c == ZWJ || FORMS.get(c).is_some_and(Forms::joins_forward))
        .unwrap_or(false)
}

fn next_accepts_join(chars: &[char], index: usize) -> bool {
    chars[index + 1..]
        .iter()
        .find(|c| !is_transparent(**c))
        .map(|c| *c == TATWEEL || *c == ZWJ || FORMS.get(c).is_some_and(Forms::joins_backward))
        .unwrap_or(false)
}

fn lam_alef(next: char) -> Option<(char, char)> {
    LAM_ALEF
        .iter()
        .find(|(alef, _, _)| *alef == next)
        .and_then(|(_, isolated, final_)| Some((char::from_u32(*isolated)?, char::from_u32(*final_)?)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapes_joined_word() {
        // سلام: seen initial, lam-alef ligature (final), meem isolated
        assert_eq!(
            ArabicReshaper::new().reshape("سلام"),
            "\u{FEB3}\u{FEFC}\u{FEE1}"
        );
    }

    #[test]
    fn shapes_medial_and_final_forms() {
        // بنت: beh initial, noon medial, teh final
        assert_eq!(
            ArabicReshaper::new().reshape("بنت"),
            "\u{FE91}\u{FEE8}\u{FE96}"
        );
    }

    #[test]
    fn right_joining_letter_breaks_the_chain() {
        // دب: dal isolated (never joins forward), beh isolated
        assert_eq!(ArabicReshaper::new().reshape("دب"), "\u{FEA9}\u{FE8F}");
    }

    #[test]
    fn zwnj_prevents_joining() {
        // meem initial, yeh final, then reh isolated after the non-joiner
        let shaped = ArabicReshaper::new().reshape("می\u{200C}ر");
        assert_eq!(shaped, "\u{FEE3}\u{FBFD}\u{200C}\u{FEAD}");
    }

    #[test]
    fn hamza_does_not_take_a_join() {
        // شیء: sheen initial, yeh final, hamza isolated
        assert_eq!(
            ArabicReshaper::new().reshape("شیء"),
            "\u{FEB7}\u{FBFD}\u{FE80}"
        );
    }

    #[test]
    fn standalone_lam_alef_uses_isolated_ligature() {
        assert_eq!(ArabicReshaper::new().reshape("لا"), "\u{FEFB}");
    }

    #[test]
    fn latin_text_is_untouched() {
        assert_eq!(ArabicReshaper::new().reshape("cat sat 42"), "cat sat 42");
    }

    #[test]
    fn words_are_shaped_independently() {
        // ب ب: two isolated behs separated by a space
        assert_eq!(ArabicReshaper::new().reshape("ب ب"), "\u{FE8F} \u{FE8F}");
    }
}
