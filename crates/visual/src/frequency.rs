use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{L}\p{M}\p{N}_\u{200C}']+").expect("word regex"));

/// Count words in the corpus.
///
/// Words are runs of letters, marks, digits, underscores, apostrophes and
/// zero-width non-joiners; shorter than `min_word_length` characters are
/// ignored. Case variants are counted together and reported under their most
/// frequent spelling. Result is sorted by count, descending, equal counts in
/// order of first appearance, and holds at most `max_words` entries.
pub fn word_frequencies(text: &str, min_word_length: usize, max_words: usize) -> Vec<(String, usize)> {
    let mut groups: Vec<WordGroup<'_>> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for word in WORD.find_iter(text).map(|m| m.as_str().trim_matches(|c| c == '\'' || c == '\u{200C}')) {
        if word.is_empty() || word.chars().count() < min_word_length {
            continue;
        }
        let key = word.to_lowercase();
        match positions.get(&key) {
            Some(&position) => groups[position].record(word),
            None => {
                positions.insert(key, groups.len());
                groups.push(WordGroup::new(word));
            }
        }
    }

    let mut counts: Vec<(String, usize)> = groups
        .iter()
        .map(|group| (group.spelling().to_string(), group.total))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(max_words);
    counts
}

/// Case variants of one word, in first-seen order.
struct WordGroup<'a> {
    total: usize,
    spellings: Vec<(&'a str, usize)>,
}

impl<'a> WordGroup<'a> {
    fn new(word: &'a str) -> Self {
        Self {
            total: 1,
            spellings: vec![(word, 1)],
        }
    }

    fn record(&mut self, word: &'a str) {
        self.total += 1;
        match self.spellings.iter_mut().find(|(spelling, _)| *spelling == word) {
            Some((_, count)) => *count += 1,
            None => self.spellings.push((word, 1)),
        }
    }

    fn spelling(&self) -> &'a str {
        // first-seen spelling wins ties
        self.spellings
            .iter()
            .fold(("", 0), |best, &(spelling, count)| if count > best.1 { (spelling, count) } else { best })
            .0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_and_orders_words() {
        let frequencies = word_frequencies(" cat sat cat mat sat cat", 2, 10);
        assert_eq!(
            frequencies,
            vec![
                ("cat".to_string(), 3),
                ("sat".to_string(), 2),
                ("mat".to_string(), 1),
            ]
        );
    }

    #[test]
    fn skips_punctuation_and_short_words() {
        let frequencies = word_frequencies("a , ok ! ? ok", 2, 10);
        assert_eq!(frequencies, vec![("ok".to_string(), 2)]);
    }

    #[test]
    fn keeps_presentation_forms_and_zwnj_words() {
        let shaped = "\u{FEB3}\u{FEFC}\u{FEE1} \u{FEB3}\u{FEFC}\u{FEE1} می\u{200C}روم";
        let frequencies = word_frequencies(shaped, 2, 10);
        assert_eq!(frequencies[0], ("\u{FEB3}\u{FEFC}\u{FEE1}".to_string(), 2));
        assert_eq!(frequencies[1], ("می\u{200C}روم".to_string(), 1));
    }

    #[test]
    fn case_variants_count_together() {
        let frequencies = word_frequencies("Cat cat dog cat Dog DOG dog", 2, 10);
        assert_eq!(
            frequencies,
            vec![("dog".to_string(), 4), ("cat".to_string(), 3)]
        );
    }

    #[test]
    fn limits_number_of_words() {
        assert_eq!(word_frequencies("aa bb cc dd", 1, 2).len(), 2);
        assert!(word_frequencies("", 1, 10).is_empty());
    }
}
