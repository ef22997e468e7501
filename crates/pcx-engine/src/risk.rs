//! Risk scoring and the 5x5 probability/impact matrix.

use std::collections::BTreeMap;

use pcx_core::entities::Risk;
use pcx_core::enums::{RiskBucket, RiskStatus};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Number of probability (and impact) levels on each matrix axis.
pub const MATRIX_SIZE: u8 = 5;

/// `probability * impact`, both in `1..=5`.
///
/// # Errors
///
/// [`EngineError::InvalidInput`] when either factor is out of range.
pub fn risk_score(probability: u8, impact: u8) -> Result<u8, EngineError> {
    for (field, value) in [("probability", probability), ("impact", impact)] {
        if !(1..=MATRIX_SIZE).contains(&value) {
            return Err(EngineError::invalid_input(
                field,
                format!("must be between 1 and {MATRIX_SIZE}, got {value}"),
            ));
        }
    }
    Ok(probability * impact)
}

/// Copy of `risk` with `risk_score` recomputed from its factors. Whatever
/// score the record carried is discarded.
///
/// # Errors
///
/// Same as [`risk_score`].
pub fn rescore(risk: &Risk) -> Result<Risk, EngineError> {
    let score = risk_score(risk.probability, risk.impact).map_err(|error| match error {
        EngineError::InvalidInput { field, reason } => EngineError::InvalidInput {
            field: format!("risk.{field}"),
            reason: format!("{}: {reason}", risk.id),
        },
        other => other,
    })?;
    Ok(Risk {
        risk_score: score,
        ..risk.clone()
    })
}

/// A risk with its derived score and band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredRisk {
    pub id: String,
    pub title: String,
    pub probability: u8,
    pub impact: u8,
    pub score: u8,
    pub bucket: RiskBucket,
    pub status: RiskStatus,
}

/// One (probability, impact) cell of the matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskCell {
    pub probability: u8,
    pub impact: u8,
    pub score: u8,
    pub bucket: RiskBucket,
    pub count: usize,
    pub risk_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskMatrix {
    pub total: usize,
    /// All 25 cells, probability-major, both axes ascending.
    pub cells: Vec<RiskCell>,
    /// Every band is present, zero counts included; counts sum to `total`.
    pub buckets: BTreeMap<RiskBucket, usize>,
    pub by_status: BTreeMap<RiskStatus, usize>,
    /// Highest scores first, ties by id.
    pub top_risks: Vec<ScoredRisk>,
}

impl RiskMatrix {
    #[must_use]
    pub fn cell(&self, probability: u8, impact: u8) -> Option<&RiskCell> {
        self.cells
            .iter()
            .find(|c| c.probability == probability && c.impact == impact)
    }
}

/// Score every risk and group the register into the matrix.
///
/// # Errors
///
/// [`EngineError::InvalidInput`] when a risk has a factor outside `1..=5`.
pub fn build_matrix(risks: &[Risk], top_n: usize) -> Result<RiskMatrix, EngineError> {
    let mut cells: Vec<RiskCell> = (1..=MATRIX_SIZE)
        .flat_map(|probability| {
            (1..=MATRIX_SIZE).map(move |impact| {
                let score = probability * impact;
                RiskCell {
                    probability,
                    impact,
                    score,
                    bucket: RiskBucket::from_score(score),
                    count: 0,
                    risk_ids: Vec::new(),
                }
            })
        })
        .collect();
    let mut buckets: BTreeMap<RiskBucket, usize> =
        RiskBucket::ALL.iter().map(|&bucket| (bucket, 0)).collect();
    let mut by_status = BTreeMap::new();
    let mut scored = Vec::with_capacity(risks.len());

    for risk in risks {
        let risk = rescore(risk)?;
        let bucket = RiskBucket::from_score(risk.risk_score);
        let slot = usize::from(risk.probability - 1) * usize::from(MATRIX_SIZE)
            + usize::from(risk.impact - 1);
        cells[slot].count += 1;
        cells[slot].risk_ids.push(risk.id.clone());
        *buckets.entry(bucket).or_default() += 1;
        *by_status.entry(risk.status).or_default() += 1;
        scored.push(ScoredRisk {
            id: risk.id,
            title: risk.title,
            probability: risk.probability,
            impact: risk.impact,
            score: risk.risk_score,
            bucket,
            status: risk.status,
        });
    }

    scored.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.id.cmp(&b.id)));
    scored.truncate(top_n);

    tracing::debug!(risks = risks.len(), "risk: matrix built");
    Ok(RiskMatrix {
        total: risks.len(),
        cells,
        buckets,
        by_status,
        top_risks: scored,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn risk(id: &str, probability: u8, impact: u8) -> Risk {
        Risk {
            id: id.into(),
            title: format!("risk {id}"),
            probability,
            impact,
            risk_score: 0,
            status: RiskStatus::Open,
        }
    }

    #[test]
    fn four_by_five_is_extreme() {
        let score = risk_score(4, 5).unwrap();
        assert_eq!(score, 20);
        assert_eq!(RiskBucket::from_score(score), RiskBucket::Extreme);
    }

    #[test]
    fn out_of_range_factor_is_rejected() {
        assert!(risk_score(0, 3).is_err());
        assert!(risk_score(3, 6).is_err());
    }

    #[test]
    fn client_supplied_score_is_ignored() {
        let mut r = risk("r1", 2, 3);
        r.risk_score = 25;
        assert_eq!(rescore(&r).unwrap().risk_score, 6);
    }

    #[test]
    fn matrix_has_twenty_five_cells_and_counts_add_up() {
        let risks = vec![
            risk("a", 1, 1),
            risk("b", 4, 5),
            risk("c", 4, 5),
            risk("d", 3, 4),
            risk("e", 2, 3),
        ];
        let matrix = build_matrix(&risks, 3).unwrap();

        assert_eq!(matrix.cells.len(), 25);
        assert_eq!(matrix.cell(4, 5).unwrap().count, 2);
        assert_eq!(matrix.buckets.values().sum::<usize>(), risks.len());
        assert_eq!(matrix.buckets[&RiskBucket::Extreme], 2);
        assert_eq!(matrix.buckets[&RiskBucket::Medium], 1);
        assert_eq!(matrix.buckets[&RiskBucket::High], 0);
        assert_eq!(matrix.by_status[&RiskStatus::Open], 5);

        let top: Vec<&str> = matrix.top_risks.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(top, vec!["b", "c", "d"]);
    }

    #[test]
    fn invalid_risk_names_the_record() {
        let err = build_matrix(&[risk("bad", 9, 1)], 5).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidInput {
                field: "risk.probability".into(),
                reason: "bad: must be between 1 and 5, got 9".into(),
            }
        );
    }
}
