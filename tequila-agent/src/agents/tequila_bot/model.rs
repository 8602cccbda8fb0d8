use crate::scan::LineScan;
use tequila_core::board::CELL_COUNT;

/// Number of feature columns; the bias column comes after them.
pub const FEATURE_COUNT: usize = 8;
/// Feature columns plus the bias column.
pub const WEIGHT_COLUMNS: usize = FEATURE_COUNT + 1;
/// One weight row per ply.
pub const WEIGHT_ROWS: usize = CELL_COUNT;

/// Initial weights used for every ply when no weight file is available.
pub const SEED_ROW: WeightRow = [8.0, 4.0, 2.0, 1.0, -8.0, -4.0, -2.0, -1.0, 1.0];

pub type WeightRow = [f64; WEIGHT_COLUMNS];

/// Counts of unblocked lines.
///
/// - `[0..4]`: lines holding 4, 3, 2, 1 of our pieces and none of the opponent's
/// - `[4..8]`: the same for the opponent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Features(pub [u32; FEATURE_COUNT]);

impl Features {
    pub fn from_scan(scan: &LineScan) -> Self {
        let mut features = [0u32; FEATURE_COUNT];

        for counts in scan.counts() {
            let own = counts.own as usize;
            let opponent = counts.opponent as usize;

            if (1..=4).contains(&own) && opponent == 0 {
                features[4 - own] += 1;
            } else if (1..=4).contains(&opponent) && own == 0 {
                features[8 - opponent] += 1;
            }
        }

        Self(features)
    }

    pub fn get(&self, index: usize) -> f64 {
        self.0[index] as f64
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }
}

/// Evaluator weights, one row per ply.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTable {
    rows: Vec<WeightRow>,
}

impl WeightTable {
    pub fn seeded() -> Self {
        Self::from_rows(vec![SEED_ROW; WEIGHT_ROWS])
    }

    /// Wraps rows that are known to number exactly [`WEIGHT_ROWS`].
    pub(super) fn from_rows(rows: Vec<WeightRow>) -> Self {
        debug_assert_eq!(rows.len(), WEIGHT_ROWS);
        Self { rows }
    }

    pub fn rows(&self) -> &[WeightRow] {
        &self.rows
    }

    /// Row used at `ply`. Plies past the last row share the last row.
    pub fn row(&self, ply: usize) -> &WeightRow {
        &self.rows[ply.min(WEIGHT_ROWS - 1)]
    }

    /// Scores a board at `ply`:
    ///
    /// `(w0*f0 + w1*f1 + w2*f2 + w3*f3) / (w4*f4 + w5*f5 + w6*f6 + w7*f7) + w8`
    ///
    /// A zero denominator does not go through the division: the result is `+inf`
    /// or `-inf` following the sign of the numerator, and `w8` when the numerator
    /// is zero as well.
    pub fn score(&self, ply: usize, features: &Features) -> f64 {
        let row = self.row(ply);
        let numerator = (0..4).map(|c| row[c] * features.get(c)).sum::<f64>();
        let denominator = (4..8).map(|c| row[c] * features.get(c)).sum::<f64>();

        if denominator == 0.0 {
            return if 0.0 < numerator {
                f64::INFINITY
            } else if numerator < 0.0 {
                f64::NEG_INFINITY
            } else {
                row[FEATURE_COUNT]
            };
        }

        numerator / denominator + row[FEATURE_COUNT]
    }

    /// Moves the row of `ply` along `error`, feature-weighted for the feature
    /// columns and unweighted for the bias.
    ///
    /// The row is left untouched and `false` returned if any updated weight
    /// would not be finite.
    pub fn apply_update(
        &mut self,
        ply: usize,
        features: &Features,
        error: f64,
        learning_rate: f64,
    ) -> bool {
        let Some(row) = self.rows.get_mut(ply) else {
            return false;
        };

        let mut updated = *row;
        for (c, weight) in updated.iter_mut().enumerate().take(FEATURE_COUNT) {
            *weight += learning_rate * features.get(c) * error;
        }
        updated[FEATURE_COUNT] += learning_rate * error;

        if !updated.iter().all(|weight| weight.is_finite()) {
            return false;
        }

        *row = updated;
        true
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::seeded()
    }
}

/// Plies whose move came from the evaluator and may therefore train it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearningMask {
    learnable: [bool; WEIGHT_ROWS],
}

impl LearningMask {
    pub fn new() -> Self {
        Self {
            learnable: [true; WEIGHT_ROWS],
        }
    }

    pub fn reset(&mut self) {
        self.learnable = [true; WEIGHT_ROWS];
    }

    /// Marks `ply` as played by a tactical override.
    pub fn skip(&mut self, ply: usize) {
        if let Some(learnable) = self.learnable.get_mut(ply) {
            *learnable = false;
        }
    }

    pub fn is_learnable(&self, ply: usize) -> bool {
        self.learnable.get(ply).copied().unwrap_or(false)
    }

    pub fn skipped(&self) -> impl Iterator<Item = usize> + '_ {
        self.learnable
            .iter()
            .enumerate()
            .filter_map(|(ply, learnable)| if *learnable { None } else { Some(ply) })
    }
}

impl Default for LearningMask {
    fn default() -> Self {
        Self::new()
    }
}
