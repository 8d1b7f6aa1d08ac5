use crate::core::normalize::normalize;

const EXACT_BASE: usize = 100;
const SUBSEQUENCE_BASE: usize = 60;
const TOKEN_HIT: u32 = 20;

/// Relevance of `text` for the search `term`, `0` meaning no match
///
/// Both inputs are normalized first. Strategies are tried in order and the
/// first non-zero score wins:
/// 1. exact substring, earlier occurrences score higher
/// 2. token overlap, 20 points per query word found inside any text word
/// 3. ordered subsequence, penalised by the characters skipped between hits
pub fn match_score(text: &str, term: &str) -> u32 {
    let text = normalize(text);
    let term = normalize(term);
    if text.is_empty() || term.is_empty() {
        return 0;
    }

    if let Some(index) = text.find(&term) {
        return EXACT_BASE.saturating_sub(index).max(1) as u32;
    }

    let hits = token_hits(&text, &term);
    if hits > 0 {
        return hits * TOKEN_HIT;
    }

    subsequence_score(&text, &term)
}

/// Count query words contained in at least one text word
///
/// Containment is substring based, so "robo" hits "robotics".
fn token_hits(text: &str, term: &str) -> u32 {
    let text_words: Vec<&str> = text.split(' ').collect();
    term.split(' ')
        .filter(|word| text_words.iter().any(|candidate| candidate.contains(word)))
        .count() as u32
}

/// Greedy ordered subsequence match over normalized (ASCII) input
fn subsequence_score(text: &str, term: &str) -> u32 {
    let term = term.as_bytes();
    let mut wanted = 0;
    let mut last_match: Option<usize> = None;
    let mut gaps = 0usize;

    for (index, byte) in text.bytes().enumerate() {
        if wanted == term.len() {
            break;
        }
        if byte == term[wanted] {
            if let Some(last) = last_match {
                gaps += index - last - 1;
            }
            last_match = Some(index);
            wanted += 1;
        }
    }

    if wanted != term.len() {
        return 0;
    }

    SUBSEQUENCE_BASE.saturating_sub(gaps).max(1) as u32
}
