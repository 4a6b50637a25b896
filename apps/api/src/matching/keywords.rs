//! Keyword Differ — vocabulary overlap and gaps between a resume and a job description.
//!
//! Both inputs are expected to be normalized already (see `normalize`).
//! Sets are `BTreeSet`s so intersection and difference come out alphabetically
//! sorted without a separate sort step.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Maximum number of words reported in each keyword list.
pub const KEYWORD_LIMIT: usize = 10;

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("word pattern is valid"));

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeywordDiff {
    /// Words present in both texts.
    pub matched: Vec<String>,
    /// Words in the job description the resume never mentions.
    pub suggested: Vec<String>,
}

/// Splits `text` into its set of distinct word tokens.
pub fn tokenize(text: &str) -> BTreeSet<String> {
    WORD.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

pub fn diff_keywords(resume_text: &str, job_text: &str) -> KeywordDiff {
    let resume_words = tokenize(resume_text);
    let job_words = tokenize(job_text);

    KeywordDiff {
        matched: resume_words
            .intersection(&job_words)
            .take(KEYWORD_LIMIT)
            .cloned()
            .collect(),
        suggested: job_words
            .difference(&resume_words)
            .take(KEYWORD_LIMIT)
            .cloned()
            .collect(),
    }
}
