use std::collections::HashMap;

use polars::prelude::*;
use serde::Serialize;

use crate::error::Result;
use crate::kpi::phase_value;
use crate::phase::{Phase, PHASE_COL};

/// Tokens shorter than this never make the keyword table.
pub const MIN_KEYWORD_LEN: usize = 3;

#[derive(Debug, Clone, Serialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SentimentSummary {
    /// Space-joined bodies of negative Crisis-phase reviews.
    pub negative_review_corpus: String,
    /// Most frequent corpus tokens, count descending then alphabetical.
    pub keywords: Vec<KeywordCount>,
    pub pre_crisis_avg_rating: Option<f64>,
    pub crisis_avg_rating: Option<f64>,
}

impl SentimentSummary {
    /// An empty corpus is a "no data" state for the renderer, not an error.
    pub fn has_reviews(&self) -> bool {
        !self.negative_review_corpus.is_empty()
    }
}

/// Join ratings to phase-attached orders, pull the negative Crisis reviews into
/// one corpus, and tally keyword frequencies plus per-phase average ratings.
pub fn sentiment_extraction(
    ratings: &DataFrame,
    orders_with_phase: &DataFrame,
    top_keywords: usize,
) -> Result<SentimentSummary> {
    let with_phase = ratings
        .clone()
        .lazy()
        .join(
            orders_with_phase
                .clone()
                .lazy()
                .select([col("order_id"), col(PHASE_COL)]),
            [col("order_id")],
            [col("order_id")],
            JoinArgs::new(JoinType::Inner),
        )
        .collect()?;

    let negative = with_phase
        .clone()
        .lazy()
        .filter(
            col(PHASE_COL)
                .eq(lit(Phase::Crisis.as_str()))
                .and(col("sentiment_score").lt(lit(0.0))),
        )
        .select([col("review_text")])
        .collect()?;

    let reviews = negative.column("review_text")?.str()?;
    let mut bodies: Vec<&str> = Vec::with_capacity(reviews.len());
    for idx in 0..reviews.len() {
        if let Some(text) = reviews.get(idx) {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                bodies.push(trimmed);
            }
        }
    }
    let corpus = bodies.join(" ");
    let keywords = keyword_frequencies(&corpus, top_keywords);

    let ratings_by_phase = with_phase
        .lazy()
        .group_by([col(PHASE_COL)])
        .agg([col("rating").mean().alias("avg_rating")])
        .collect()?;
    let pre_crisis_avg_rating = phase_value(&ratings_by_phase, Phase::PreCrisis, "avg_rating")?;
    let crisis_avg_rating = phase_value(&ratings_by_phase, Phase::Crisis, "avg_rating")?;

    Ok(SentimentSummary {
        negative_review_corpus: corpus,
        keywords,
        pre_crisis_avg_rating,
        crisis_avg_rating,
    })
}

/// Tally lowercased alphanumeric tokens of at least MIN_KEYWORD_LEN characters.
fn keyword_frequencies(corpus: &str, top_n: usize) -> Vec<KeywordCount> {
    let mut counts: HashMap<String, u32> = HashMap::new();
    for raw in corpus.split_whitespace() {
        let token: String = raw
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(|c| c.to_lowercase())
            .collect();
        if token.chars().count() >= MIN_KEYWORD_LEN {
            *counts.entry(token).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<KeywordCount> = counts
        .into_iter()
        .map(|(keyword, count)| KeywordCount { keyword, count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.keyword.cmp(&b.keyword)));
    ranked.truncate(top_n);
    ranked
}
