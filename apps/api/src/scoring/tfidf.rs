//! Pairwise TF-IDF cosine similarity.
//!
//! The corpus is exactly the two documents being compared, so idf only
//! separates shared terms (df = 2) from one-sided terms (df = 1).
//! Weighting: raw counts, smoothed idf `ln((1 + n) / (1 + df)) + 1`,
//! l2-normalized vectors.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Tokens of two or more word characters.
static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"));

static STOP_WORDS: LazyLock<BTreeSet<&'static str>> =
    LazyLock::new(|| ENGLISH_STOP_WORDS.iter().copied().collect());

pub const DEFAULT_MAX_FEATURES: usize = 2000;

#[derive(Debug, Error, PartialEq)]
pub enum SimilarityError {
    #[error("empty vocabulary; documents contain only stop words")]
    EmptyVocabulary,
}

type TermCounts = BTreeMap<String, u32>;

/// Cosine similarity of `a` and `b` in [0, 1].
///
/// Errors when neither document has a countable term. A document with no
/// terms of its own scores 0 against the other.
pub fn pairwise_cosine(a: &str, b: &str, max_features: usize) -> Result<f64, SimilarityError> {
    let docs = [term_counts(a), term_counts(b)];

    let vocabulary = select_vocabulary(&docs, max_features);
    if vocabulary.is_empty() {
        return Err(SimilarityError::EmptyVocabulary);
    }

    let n = docs.len() as f64;
    let idf: Vec<f64> = vocabulary
        .iter()
        .map(|term| {
            let df = docs.iter().filter(|d| d.contains_key(*term)).count() as f64;
            ((1.0 + n) / (1.0 + df)).ln() + 1.0
        })
        .collect();

    let vectorize = |doc: &TermCounts| -> Vec<f64> {
        vocabulary
            .iter()
            .zip(&idf)
            .map(|(term, w)| f64::from(doc.get(*term).copied().unwrap_or(0)) * w)
            .collect()
    };
    let left = vectorize(&docs[0]);
    let right = vectorize(&docs[1]);

    let norm = |v: &[f64]| v.iter().map(|x| x * x).sum::<f64>().sqrt();
    let (left_norm, right_norm) = (norm(&left), norm(&right));
    if left_norm == 0.0 || right_norm == 0.0 {
        return Ok(0.0);
    }

    let dot: f64 = left.iter().zip(&right).map(|(x, y)| x * y).sum();
    Ok((dot / (left_norm * right_norm)).clamp(0.0, 1.0))
}

fn term_counts(text: &str) -> TermCounts {
    let lowered = text.to_lowercase();
    let mut counts = TermCounts::new();
    for token in TOKEN.find_iter(&lowered) {
        let token = token.as_str();
        if STOP_WORDS.contains(token) {
            continue;
        }
        *counts.entry(token.to_string()).or_default() += 1;
    }
    counts
}

/// Keeps the `max_features` terms with the highest total count across both
/// documents; ties go to the alphabetically earlier term.
fn select_vocabulary(docs: &[TermCounts], max_features: usize) -> Vec<&str> {
    let mut totals: BTreeMap<&str, u32> = BTreeMap::new();
    for doc in docs {
        for (term, count) in doc {
            *totals.entry(term.as_str()).or_default() += count;
        }
    }

    let mut ranked: Vec<(&str, u32)> = totals.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(max_features);

    let mut vocabulary: Vec<&str> = ranked.into_iter().map(|(term, _)| term).collect();
    vocabulary.sort_unstable();
    vocabulary
}

const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can",
    "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail", "do",
    "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
    "for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
    "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into",
    "is", "it", "its", "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd",
    "made", "many", "may", "me", "meanwhile", "might", "mill", "mine", "more", "moreover",
    "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely", "neither",
    "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto", "or",
    "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own", "part",
    "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed",
    "seeming", "seems", "serious", "several", "she", "should", "show", "side", "since",
    "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than", "that", "the",
    "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "thick", "thin", "third", "this",
    "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together", "too",
    "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up", "upon",
    "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when", "whence",
    "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon", "wherever",
    "whether", "which", "while", "whither", "who", "whoever", "whole", "whom", "whose", "why",
    "will", "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves",
];
