use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use unicode_categories::UnicodeCategories;

use crate::types::{SummaryOrigin, SummaryResult};

/// Limits for the local summarizer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LocalSummaryConfig {
    /// Sentences taken from the start of the text.
    pub max_sentences: usize,
    /// Hard cap on summary length, in codepoints.
    pub max_summary_chars: usize,
    /// Keywords returned.
    pub max_keywords: usize,
    /// Tokens shorter than this (in codepoints) are not keywords.
    pub min_keyword_chars: usize,
}

impl Default for LocalSummaryConfig {
    fn default() -> Self {
        Self {
            max_sentences: 3,
            max_summary_chars: 300,
            max_keywords: 8,
            min_keyword_chars: 2,
        }
    }
}

/// Deterministic summary from leading sentences and keyword frequency.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSummarizer {
    cfg: LocalSummaryConfig,
}

impl LocalSummarizer {
    pub fn new(cfg: LocalSummaryConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &LocalSummaryConfig {
        &self.cfg
    }

    pub fn summarize(&self, text: &str) -> SummaryResult {
        SummaryResult {
            summary: self.summary(text),
            keywords: self.keywords(text),
            origin: SummaryOrigin::Local,
        }
    }

    /// Leading trimmed sentences concatenated with no separator, then cut
    /// to the character cap.
    pub fn summary(&self, text: &str) -> String {
        let sentences = canonical::split_sentences(text);
        let take = sentences.len().min(self.cfg.max_sentences);
        let joined = sentences[..take].concat();
        canonical::truncate_chars(&joined, self.cfg.max_summary_chars).to_string()
    }

    /// Most frequent tokens, ties broken alphabetically.
    ///
    /// Short tokens and tokens made only of decimal digits (any script) are
    /// skipped.
    pub fn keywords(&self, text: &str) -> Vec<String> {
        let mut freq: HashMap<String, usize> = HashMap::new();
        for token in canonical::tokenize(text) {
            if token.chars().count() < self.cfg.min_keyword_chars {
                continue;
            }
            if token.chars().all(|c| c.is_number_decimal_digit()) {
                continue;
            }
            *freq.entry(token).or_default() += 1;
        }

        let mut ranked: Vec<(String, usize)> = freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked
            .into_iter()
            .take(self.cfg.max_keywords)
            .map(|(token, _)| token)
            .collect()
    }
}
