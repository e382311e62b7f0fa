//! Priority ranking with hybrid entropy + principal-component weighting.
//!
//! Three criteria per district — lack of tree equity, air exposure, heat
//! exposure (all from the normalized hotspot indices) — are weighted by
//! the mean of two data-driven methods:
//!
//! 1. **Entropy method**: criteria whose values spread more across the
//!    cohort carry more information and get more weight.
//! 2. **First principal component**: absolute loadings of the dominant
//!    eigenvector of the criteria correlation matrix (power iteration;
//!    the matrix is only 3×3).
//!
//! Priority = Σ wᵢ · criterionᵢ, ranked descending. Degenerate cohorts
//! (fewer than two districts, or a zero-variance criterion) fall back to
//! equal weights.

use serde::{Deserialize, Serialize};

use crate::hotspot::HotspotRecord;

/// Floor applied to criterion values so the entropy logarithms stay finite.
const VALUE_FLOOR: f64 = 1e-12;
/// Power-iteration rounds; far more than a 3×3 matrix needs to converge.
const POWER_ITERATIONS: usize = 64;

/// Weights over the three priority criteria. Always sums to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriterionWeights {
    /// Weight on (1 − tree equity).
    pub lack_tree: f64,
    /// Weight on air exposure.
    pub air: f64,
    /// Weight on heat exposure.
    pub heat: f64,
}

impl CriterionWeights {
    /// Equal weighting, the degenerate-cohort fallback.
    pub const EQUAL: CriterionWeights = CriterionWeights {
        lack_tree: 1.0 / 3.0,
        air: 1.0 / 3.0,
        heat: 1.0 / 3.0,
    };
}

/// Weights from each method plus their combination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightBreakdown {
    pub entropy: CriterionWeights,
    pub pca: CriterionWeights,
    pub combined: CriterionWeights,
}

/// One district's priority score and rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityRecord {
    pub district: String,
    /// Weighted criterion sum, higher = more urgent.
    pub priority: f64,
    /// 1-based rank, 1 = most urgent.
    pub rank: usize,
}

/// Priority ranking for one city's districts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityReport {
    pub city: String,
    /// Mean priority across districts — the city's overall urgency.
    pub mean_priority: f64,
    pub weights: WeightBreakdown,
    /// Districts sorted by descending priority.
    pub districts: Vec<PriorityRecord>,
}

/// Criterion matrix: one row per district, columns (lack_tree, air, heat).
fn criteria(records: &[HotspotRecord]) -> Vec<[f64; 3]> {
    records
        .iter()
        .map(|r| {
            [
                (1.0 - r.tree_equity_norm).max(VALUE_FLOOR),
                r.air_exposure_norm.max(VALUE_FLOOR),
                r.heat_exposure_norm.max(VALUE_FLOOR),
            ]
        })
        .collect()
}

fn column(rows: &[[f64; 3]], j: usize) -> Vec<f64> {
    rows.iter().map(|row| row[j]).collect()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn std_dev(values: &[f64], mean: f64) -> f64 {
    (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64).sqrt()
}

/// Entropy-method weights: 1 − normalized Shannon entropy per column,
/// renormalized to sum 1.
fn entropy_weights(rows: &[[f64; 3]]) -> [f64; 3] {
    let n = rows.len() as f64;
    let k = 1.0 / n.ln();
    let mut divergence = [0.0; 3];
    for (j, d) in divergence.iter_mut().enumerate() {
        let col = column(rows, j);
        let sum: f64 = col.iter().sum();
        let entropy: f64 = -k
            * col
                .iter()
                .map(|v| {
                    let p = v / sum;
                    p * p.ln()
                })
                .sum::<f64>();
        *d = 1.0 - entropy;
    }
    let total: f64 = divergence.iter().sum();
    if total.abs() < VALUE_FLOOR {
        return [1.0 / 3.0; 3];
    }
    [
        divergence[0] / total,
        divergence[1] / total,
        divergence[2] / total,
    ]
}

/// First-principal-component weights: absolute loadings of the dominant
/// eigenvector of the 3×3 correlation matrix, normalized to sum 1.
fn pca_weights(rows: &[[f64; 3]]) -> [f64; 3] {
    let n = rows.len() as f64;

    // Standardize columns.
    let mut z = rows.to_vec();
    for j in 0..3 {
        let col = column(rows, j);
        let m = mean(&col);
        let s = std_dev(&col, m);
        for row in z.iter_mut() {
            row[j] = (row[j] - m) / s;
        }
    }

    // Correlation matrix C = ZᵀZ / n.
    let mut c = [[0.0; 3]; 3];
    for (j, cj) in c.iter_mut().enumerate() {
        for (l, cjl) in cj.iter_mut().enumerate() {
            *cjl = z.iter().map(|row| row[j] * row[l]).sum::<f64>() / n;
        }
    }

    // Power iteration for the dominant eigenvector.
    let mut v = [1.0 / 3.0_f64.sqrt(); 3];
    for _ in 0..POWER_ITERATIONS {
        let mut next = [0.0; 3];
        for (j, slot) in next.iter_mut().enumerate() {
            *slot = c[j][0] * v[0] + c[j][1] * v[1] + c[j][2] * v[2];
        }
        let norm = (next[0] * next[0] + next[1] * next[1] + next[2] * next[2]).sqrt();
        if norm < VALUE_FLOOR {
            return [1.0 / 3.0; 3];
        }
        v = [next[0] / norm, next[1] / norm, next[2] / norm];
    }

    let loadings = [v[0].abs(), v[1].abs(), v[2].abs()];
    let total: f64 = loadings.iter().sum();
    [
        loadings[0] / total,
        loadings[1] / total,
        loadings[2] / total,
    ]
}

/// Compute the weight breakdown for a cohort.
pub fn compute_weights(records: &[HotspotRecord]) -> WeightBreakdown {
    let rows = criteria(records);

    // A zero-variance criterion (or a too-small cohort) carries no ranking
    // information; both methods fall back to equal weights.
    let degenerate = rows.len() < 2
        || (0..3).any(|j| {
            let col = column(&rows, j);
            let m = mean(&col);
            std_dev(&col, m) < VALUE_FLOOR
        });
    if degenerate {
        log::warn!("degenerate priority criteria, falling back to equal weights");
        return WeightBreakdown {
            entropy: CriterionWeights::EQUAL,
            pca: CriterionWeights::EQUAL,
            combined: CriterionWeights::EQUAL,
        };
    }

    let e = entropy_weights(&rows);
    let p = pca_weights(&rows);
    let combined = [
        (e[0] + p[0]) / 2.0,
        (e[1] + p[1]) / 2.0,
        (e[2] + p[2]) / 2.0,
    ];

    WeightBreakdown {
        entropy: CriterionWeights {
            lack_tree: e[0],
            air: e[1],
            heat: e[2],
        },
        pca: CriterionWeights {
            lack_tree: p[0],
            air: p[1],
            heat: p[2],
        },
        combined: CriterionWeights {
            lack_tree: combined[0],
            air: combined[1],
            heat: combined[2],
        },
    }
}

/// Rank a city's districts by weighted priority, descending.
pub fn compute_priority(city: &str, records: &[HotspotRecord]) -> PriorityReport {
    let weights = compute_weights(records);
    let w = weights.combined;

    let mut districts: Vec<PriorityRecord> = records
        .iter()
        .map(|r| PriorityRecord {
            district: r.reading.district.clone(),
            priority: w.lack_tree * (1.0 - r.tree_equity_norm)
                + w.air * r.air_exposure_norm
                + w.heat * r.heat_exposure_norm,
            rank: 0,
        })
        .collect();

    districts.sort_by(|a, b| b.priority.total_cmp(&a.priority));
    for (i, d) in districts.iter_mut().enumerate() {
        d.rank = i + 1;
    }

    let mean_priority = if districts.is_empty() {
        0.0
    } else {
        districts.iter().map(|d| d.priority).sum::<f64>() / districts.len() as f64
    };

    PriorityReport {
        city: city.to_string(),
        mean_priority,
        weights,
        districts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::district::DistrictReading;
    use crate::hotspot::compute_hotspots;

    fn reading(name: &str, vegetation: f64, heat: f64, air: f64, pop: f64) -> DistrictReading {
        DistrictReading {
            district: name.into(),
            month: "Oct".into(),
            vegetation,
            heat_island_c: heat,
            air_quality: air,
            population: pop,
            latitude: 40.7,
            longitude: -74.0,
        }
    }

    fn records() -> Vec<HotspotRecord> {
        compute_hotspots(&[
            reading("Industrial East", 0.24, 8.2, 78.0, 12_500.0),
            reading("Downtown Core", 0.31, 7.8, 72.0, 18_900.0),
            reading("Port District", 0.19, 8.7, 82.0, 8_200.0),
            reading("Commercial Strip", 0.35, 6.9, 68.0, 21_300.0),
            reading("Dense Residential", 0.29, 7.2, 71.0, 25_400.0),
        ])
    }

    // -----------------------------------------------------------------------
    // Weights
    // -----------------------------------------------------------------------

    #[test]
    fn weights_sum_to_one() {
        let w = compute_weights(&records());
        for cw in [w.entropy, w.pca, w.combined] {
            let sum = cw.lack_tree + cw.air + cw.heat;
            assert!((sum - 1.0).abs() < 1e-9, "weights sum {sum}");
        }
    }

    #[test]
    fn weights_are_positive() {
        let w = compute_weights(&records()).combined;
        assert!(w.lack_tree > 0.0);
        assert!(w.air > 0.0);
        assert!(w.heat > 0.0);
    }

    #[test]
    fn single_district_falls_back_to_equal() {
        let one = compute_hotspots(&[reading("Solo", 0.3, 7.5, 70.0, 10_000.0)]);
        let w = compute_weights(&one);
        assert_eq!(w.combined, CriterionWeights::EQUAL);
    }

    #[test]
    fn zero_variance_cohort_falls_back_to_equal() {
        let same = compute_hotspots(&[
            reading("A", 0.3, 7.5, 70.0, 10_000.0),
            reading("B", 0.3, 7.5, 70.0, 10_000.0),
            reading("C", 0.3, 7.5, 70.0, 10_000.0),
        ]);
        let w = compute_weights(&same);
        assert_eq!(w.combined, CriterionWeights::EQUAL);
    }

    // -----------------------------------------------------------------------
    // Ranking
    // -----------------------------------------------------------------------

    #[test]
    fn ranks_are_dense_and_sorted() {
        let report = compute_priority("San Francisco", &records());
        assert_eq!(report.districts.len(), 5);
        for (i, d) in report.districts.iter().enumerate() {
            assert_eq!(d.rank, i + 1);
        }
        for pair in report.districts.windows(2) {
            assert!(pair[0].priority >= pair[1].priority);
        }
    }

    #[test]
    fn densest_underserved_district_ranks_first() {
        // Dense Residential: least green space per resident and the
        // largest population behind its heat and air burden — it maxes
        // all three criteria, so it ranks first under any weights.
        let report = compute_priority("San Francisco", &records());
        assert_eq!(report.districts[0].district, "Dense Residential");
    }

    #[test]
    fn sparse_district_ranks_last() {
        // Port District reads worst per-area (lowest NDVI, hottest) but
        // its small population gives it the best per-resident tree equity
        // and the lightest exposure burden.
        let report = compute_priority("San Francisco", &records());
        assert_eq!(
            report.districts.last().unwrap().district,
            "Port District"
        );
    }

    #[test]
    fn mean_priority_is_average() {
        let report = compute_priority("San Francisco", &records());
        let mean: f64 = report.districts.iter().map(|d| d.priority).sum::<f64>()
            / report.districts.len() as f64;
        assert!((report.mean_priority - mean).abs() < 1e-12);
    }

    #[test]
    fn empty_cohort_yields_empty_report() {
        let report = compute_priority("Nowhere", &[]);
        assert!(report.districts.is_empty());
        assert_eq!(report.mean_priority, 0.0);
    }

    #[test]
    fn priorities_stay_in_unit_interval() {
        let report = compute_priority("San Francisco", &records());
        for d in &report.districts {
            assert!(
                (0.0..=1.0).contains(&d.priority),
                "{}: priority {} out of range",
                d.district,
                d.priority
            );
        }
    }
}
