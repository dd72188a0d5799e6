//! "Lightning indexer" demo: causal top-k selection over a seeded score
//! matrix.
//!
//! The widget shows a row of tokens; hovering one makes it the query and
//! highlights the k highest-scoring causal predecessors. Scores are
//! generated once per mount from a fixed seed (distance-biased plus bounded
//! noise) so the demo is reproducible for the whole viewing session, then
//! classification is a pure function of `(scores, k, query_index)`.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::vecmath::top_k_indices;

/// Base relevance for adjacent tokens; decays with index distance.
const DISTANCE_DECAY: f32 = 0.4;

/// Half-width of the uniform noise added to each pair score.
const NOISE_BOUND: f32 = 0.15;

/// Pairwise relevance scores for one mounted widget instance.
///
/// Row `q` holds the scores of every token as seen from query position `q`.
/// Built fresh per mount; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexerScores {
    token_count: usize,
    scores: Vec<Vec<f32>>,
}

impl IndexerScores {
    /// Generate a score matrix from a fixed session seed.
    pub fn generate(token_count: usize, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::generate_with(token_count, &mut rng)
    }

    /// Generate a score matrix from an injected RNG.
    ///
    /// Closer index pairs score higher; every pair gets bounded uniform
    /// noise on top so the ranking is not a pure distance function.
    pub fn generate_with<R: Rng>(token_count: usize, rng: &mut R) -> Self {
        debug!(token_count, "generating indexer score matrix");
        let scores = (0..token_count)
            .map(|q| {
                (0..token_count)
                    .map(|i| {
                        let distance = q.abs_diff(i) as f32;
                        1.0 / (1.0 + DISTANCE_DECAY * distance)
                            + rng.gen_range(-NOISE_BOUND..NOISE_BOUND)
                    })
                    .collect()
            })
            .collect();
        Self {
            token_count,
            scores,
        }
    }

    /// Number of tokens in the demo row.
    pub fn token_count(&self) -> usize {
        self.token_count
    }

    /// Relevance of token `i` as seen from query position `q`.
    ///
    /// # Panics
    /// Panics if `q` or `i` is not below [`token_count`](Self::token_count).
    /// Unlike [`classify`], which tolerates a stale hover index, these
    /// accessors are for callers iterating the matrix they just built.
    pub fn score(&self, q: usize, i: usize) -> f32 {
        self.scores[q][i]
    }

    /// The full score row for query position `q`.
    ///
    /// # Panics
    /// Panics if `q` is not below [`token_count`](Self::token_count).
    pub fn row(&self, q: usize) -> &[f32] {
        &self.scores[q]
    }
}

/// Per-token classification for the indexer widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenClass {
    /// The hovered/selected query position itself.
    Query,
    /// A position after the query; excluded regardless of score.
    Future,
    /// A causal predecessor ranked in the top k.
    Selected,
    /// A causal predecessor that lost the top-k ranking.
    Skipped,
    /// No query is active.
    Neutral,
}

/// Classify every token for the current hover state.
///
/// `query_index = None` means no token is hovered and everything is
/// `Neutral`. Otherwise candidates are the strict causal predecessors
/// `i < q`, ranked by `scores[q][i]` descending with ties broken stable by
/// ascending index; the first `k` (or all, if fewer exist) are `Selected`
/// and the remainder `Skipped`.
pub fn classify(
    scores: &IndexerScores,
    k: usize,
    query_index: Option<usize>,
) -> Vec<TokenClass> {
    let n = scores.token_count();
    let q = match query_index {
        Some(q) => q,
        None => return vec![TokenClass::Neutral; n],
    };
    if q >= n {
        // The shell clamps hover indices; an out-of-range query means the
        // widget was rewired mid-session. Treat it as no active query.
        warn!(q, n, "query index out of range, classifying as neutral");
        return vec![TokenClass::Neutral; n];
    }

    let selected = top_k_indices(&scores.row(q)[..q], k);

    let mut classes = vec![TokenClass::Skipped; n];
    classes[q] = TokenClass::Query;
    for class in classes.iter_mut().skip(q + 1) {
        *class = TokenClass::Future;
    }
    for &i in &selected {
        classes[i] = TokenClass::Selected;
    }
    classes
}
