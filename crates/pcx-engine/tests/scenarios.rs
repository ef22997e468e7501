//! Worked examples with hand-checked numbers.

use pcx_core::entities::{ProgressSnapshot, Risk, WbsNode};
use pcx_core::enums::{CostStatus, RiskBucket, RiskStatus, ScheduleStatus};
use pcx_engine::cost::CostTotals;
use pcx_engine::rollup::NodeProgress;
use pcx_engine::{WbsTree, build_matrix, compute_evm, rescore, roll_up};
use pretty_assertions::assert_eq;

fn close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn two_leaf_weighted_roll_up() {
    let node = |id: &str, parent: Option<&str>, weightage: f64| WbsNode {
        id: id.into(),
        code: id.into(),
        name: None,
        parent_id: parent.map(Into::into),
        level: u32::from(parent.is_some()),
        weightage,
        order: 0,
    };
    let build = WbsTree::build(
        vec![
            node("root", None, 100.0),
            node("A", Some("root"), 40.0),
            node("B", Some("root"), 60.0),
        ],
        0.01,
    )
    .unwrap();
    let on = "2024-05-31".parse().unwrap();
    let snapshot = |id: &str, physical: f64| ProgressSnapshot {
        wbs_id: id.into(),
        report_date: on,
        physical_progress: Some(physical),
        planned_progress: None,
        manhours: None,
    };

    let rolled = roll_up(&build, &[snapshot("A", 50.0), snapshot("B", 80.0)], on).unwrap();

    close(rolled.project.physical, 68.0);
    close(rolled.node("root").unwrap().physical, 68.0);
    assert!(rolled.warnings.is_empty());
    assert!(build.tree.level_mismatches().is_empty());
}

#[test]
fn earned_value_worked_example() {
    let progress = NodeProgress {
        physical: 50.0,
        planned: 60.0,
        manhours: 0.0,
    };
    let cost = CostTotals {
        actual: 40_000.0,
        ..CostTotals::default()
    };

    let m = compute_evm(100_000.0, progress, &cost).unwrap();

    close(m.ev, 50_000.0);
    close(m.pv, 60_000.0);
    close(m.cv, 10_000.0);
    close(m.sv, -10_000.0);
    close(m.cpi, 1.25);
    assert!((m.spi - 0.833).abs() < 1e-3);
    close(m.eac, 80_000.0);
    close(m.etc, 40_000.0);
    close(m.vac, 20_000.0);
    close(m.tcpi, 50_000.0 / 60_000.0);
    close(m.percent_spent, 40.0);
    assert_eq!(m.cost_status, CostStatus::UnderBudget);
    assert_eq!(m.schedule_status, ScheduleStatus::BehindSchedule);
}

#[test]
fn probability_four_impact_five_is_extreme() {
    let risk = Risk {
        id: "R-7".into(),
        title: "Late steel delivery".into(),
        probability: 4,
        impact: 5,
        risk_score: 3,
        status: RiskStatus::Mitigating,
    };

    let scored = rescore(&risk).unwrap();
    assert_eq!(scored.risk_score, 20);
    assert_eq!(RiskBucket::from_score(scored.risk_score), RiskBucket::Extreme);
    assert_eq!(RiskBucket::Extreme.label(), "Extreme");

    let matrix = build_matrix(&[risk], 10).unwrap();
    assert_eq!(matrix.cell(4, 5).unwrap().risk_ids, vec!["R-7".to_string()]);
    assert_eq!(matrix.top_risks[0].bucket, RiskBucket::Extreme);
}
