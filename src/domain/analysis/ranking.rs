//! Candidate Ranker - Orders scored designs and assigns relative ratings.

use serde::{Deserialize, Serialize};

use super::AggregateScore;

/// Rating given to the best candidate.
pub const BEST_RATING: f64 = 100.0;

/// A labelled design together with its aggregate score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub label: String,
    pub score: AggregateScore,
}

impl ScoredCandidate {
    pub fn new(label: impl Into<String>, score: AggregateScore) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// A candidate's position in a ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    /// 1-based position, best first.
    pub rank: usize,
    pub candidate: ScoredCandidate,
    /// Linear rescale of the score so the best is 100 and the worst 0.
    pub relative_rating: f64,
}

/// Stateless ranking of scored candidates.
pub struct CandidateRanker;

impl CandidateRanker {
    /// Sorts by score descending, keeping input order on ties.
    ///
    /// When every candidate has the same score they all rate 100.
    pub fn rank(candidates: Vec<ScoredCandidate>) -> Vec<RankedCandidate> {
        let mut sorted = candidates;
        sorted.sort_by(|a, b| b.score.score.total_cmp(&a.score.score));

        let best = sorted.first().map(|c| c.score.score);
        let worst = sorted.last().map(|c| c.score.score);

        sorted
            .into_iter()
            .enumerate()
            .map(|(index, candidate)| {
                let relative_rating = match (best, worst) {
                    (Some(best), Some(worst)) if best > worst => {
                        (candidate.score.score - worst) / (best - worst) * BEST_RATING
                    }
                    _ => BEST_RATING,
                };
                RankedCandidate {
                    rank: index + 1,
                    candidate,
                    relative_rating,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::Paradigm;

    fn candidate(label: &str, score: f64) -> ScoredCandidate {
        ScoredCandidate::new(
            label,
            AggregateScore {
                paradigm: Paradigm::WeightedSum,
                score,
                binding: None,
            },
        )
    }

    #[test]
    fn rank_orders_best_first() {
        let ranked = CandidateRanker::rank(vec![
            candidate("a", 40.0),
            candidate("b", 90.0),
            candidate("c", 65.0),
        ]);
        let labels: Vec<_> = ranked.iter().map(|r| r.candidate.label.as_str()).collect();
        assert_eq!(labels, vec!["b", "c", "a"]);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[2].rank, 3);
    }

    #[test]
    fn relative_rating_spans_zero_to_hundred() {
        let ranked = CandidateRanker::rank(vec![
            candidate("a", 40.0),
            candidate("b", 90.0),
            candidate("c", 65.0),
        ]);
        assert_eq!(ranked[0].relative_rating, 100.0);
        assert!((ranked[1].relative_rating - 50.0).abs() < 1e-12);
        assert_eq!(ranked[2].relative_rating, 0.0);
    }

    #[test]
    fn ties_keep_input_order() {
        let ranked = CandidateRanker::rank(vec![candidate("first", 70.0), candidate("second", 70.0)]);
        assert_eq!(ranked[0].candidate.label, "first");
        assert_eq!(ranked[1].candidate.label, "second");
    }

    #[test]
    fn equal_scores_all_rate_best() {
        let ranked = CandidateRanker::rank(vec![candidate("a", 55.0), candidate("b", 55.0)]);
        assert!(ranked.iter().all(|r| r.relative_rating == BEST_RATING));
    }

    #[test]
    fn empty_input_ranks_nothing() {
        assert!(CandidateRanker::rank(Vec::new()).is_empty());
    }
}
