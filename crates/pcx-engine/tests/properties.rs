//! Invariants that must hold for any valid input, checked over a spread of
//! tree shapes and values.

use chrono::NaiveDate;
use pcx_config::VarianceConfig;
use pcx_core::entities::{BaselineTask, ProgressSnapshot, Risk, ScheduleTask, WbsNode};
use pcx_core::enums::{RiskBucket, RiskStatus, VarianceStatus};
use pcx_engine::cost::CostTotals;
use pcx_engine::rollup::NodeProgress;
use pcx_engine::{TreeBuild, WbsTree, build_matrix, build_s_curve, classify, compute_evm, roll_up};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn node(id: &str, parent: Option<&str>, weightage: f64) -> WbsNode {
    WbsNode {
        id: id.into(),
        code: id.into(),
        name: None,
        parent_id: parent.map(Into::into),
        level: 0,
        weightage,
        order: 0,
    }
}

fn snapshot(id: &str, on: &str, physical: f64) -> ProgressSnapshot {
    ProgressSnapshot {
        wbs_id: id.into(),
        report_date: date(on),
        physical_progress: Some(physical),
        planned_progress: Some(physical),
        manhours: None,
    }
}

/// Balanced tree: one root at 100, `fanout` children per node, `depth`
/// levels below the root. Weightages split unevenly but sum to 100.
fn balanced(fanout: usize, depth: u32) -> Vec<WbsNode> {
    let mut nodes = vec![node("r", None, 100.0)];
    let mut frontier = vec!["r".to_string()];
    for _ in 0..depth {
        let mut next = Vec::new();
        for parent in &frontier {
            let weights = split(fanout);
            for (i, weight) in weights.into_iter().enumerate() {
                let id = format!("{parent}.{}", i + 1);
                nodes.push(node(&id, Some(parent), weight));
                next.push(id);
            }
        }
        frontier = next;
    }
    nodes
}

/// `n` weights in a 1:2:...:n ratio summing to exactly 100 (last absorbs
/// rounding).
fn split(n: usize) -> Vec<f64> {
    let total: usize = (1..=n).sum();
    let mut weights: Vec<f64> = (1..=n)
        .map(|i| ((i * 10_000 / total) as f64) / 100.0)
        .collect();
    let head: f64 = weights[..n - 1].iter().sum();
    weights[n - 1] = 100.0 - head;
    weights
}

fn build(nodes: Vec<WbsNode>) -> TreeBuild {
    WbsTree::build(nodes, 0.01).unwrap()
}

#[rstest]
#[case(2, 1)]
#[case(3, 2)]
#[case(4, 3)]
#[case(1, 5)]
fn root_equals_leaf_progress_times_path_weight(#[case] fanout: usize, #[case] depth: u32) {
    let build = build(balanced(fanout, depth));
    let leaves = build.tree.leaves();
    let snapshots: Vec<ProgressSnapshot> = leaves
        .iter()
        .enumerate()
        .map(|(i, leaf)| snapshot(&leaf.id, "2024-06-30", ((i * 37) % 101) as f64))
        .collect();

    let rolled = roll_up(&build, &snapshots, date("2024-06-30")).unwrap();
    let expected: f64 = snapshots
        .iter()
        .map(|s| {
            s.physical_progress.unwrap() * build.tree.path_weight_product(&s.wbs_id).unwrap()
        })
        .sum();

    assert!(build.warnings.is_empty());
    assert!(
        (rolled.project.physical - expected).abs() < 1e-6,
        "root {} vs leaf sum {expected}",
        rolled.project.physical
    );
}

#[rstest]
#[case(2, 1)]
#[case(3, 3)]
#[case(5, 2)]
fn all_leaves_complete_means_root_complete(#[case] fanout: usize, #[case] depth: u32) {
    let build = build(balanced(fanout, depth));
    let snapshots: Vec<ProgressSnapshot> = build
        .tree
        .leaves()
        .iter()
        .map(|leaf| snapshot(&leaf.id, "2024-01-31", 100.0))
        .collect();

    let rolled = roll_up(&build, &snapshots, date("2024-01-31")).unwrap();
    assert!((rolled.project.physical - 100.0).abs() < 1e-9);
}

#[rstest]
fn zero_actual_cost_gives_unit_cpi(
    #[values(0.0, 0.5, 33.3, 100.0)] physical: f64,
    #[values(1.0, 250_000.0, 1e12)] budget: f64,
) {
    let progress = NodeProgress {
        physical,
        planned: 50.0,
        manhours: 0.0,
    };
    let metrics = compute_evm(budget, progress, &CostTotals::default()).unwrap();
    assert_eq!(metrics.cpi, 1.0);
    assert!(metrics.eac.is_finite());
    assert!(metrics.tcpi.is_finite());
}

#[rstest]
#[case(10.0)]
#[case(50.0)]
#[case(99.9)]
fn equal_earned_and_planned_value_is_on_schedule(#[case] percent: f64) {
    let progress = NodeProgress {
        physical: percent,
        planned: percent,
        manhours: 0.0,
    };
    let metrics = compute_evm(80_000.0, progress, &CostTotals::default()).unwrap();
    assert_eq!(metrics.sv, 0.0);
    assert_eq!(metrics.spi, 1.0);
}

#[test]
fn risk_buckets_cover_every_risk() {
    let risks: Vec<Risk> = (1..=5u8)
        .flat_map(|p| (1..=5u8).map(move |i| (p, i)))
        .enumerate()
        .map(|(n, (probability, impact))| Risk {
            id: format!("R-{n:02}"),
            title: "scored".into(),
            probability,
            impact,
            risk_score: 0,
            status: RiskStatus::Open,
        })
        .collect();

    let matrix = build_matrix(&risks, 5).unwrap();
    assert_eq!(matrix.buckets.values().sum::<usize>(), risks.len());
    assert_eq!(matrix.buckets.len(), RiskBucket::ALL.len());
    for cell in &matrix.cells {
        assert_eq!(cell.score, cell.probability * cell.impact);
        assert!((1..=25).contains(&cell.score));
        assert_eq!(cell.count, 1);
    }
}

#[test]
fn s_curve_has_one_point_per_distinct_report_date() {
    let build = build(balanced(2, 1));
    let snapshots = vec![
        snapshot("r.1", "2024-03-31", 30.0),
        snapshot("r.2", "2024-01-31", 5.0),
        snapshot("r.1", "2024-01-31", 10.0),
        snapshot("r.2", "2024-02-29", 15.0),
        snapshot("r.2", "2024-03-31", 25.0),
    ];

    let curve = build_s_curve(&build, &snapshots, 10_000.0).unwrap();
    assert_eq!(curve.points.len(), 3);
    assert!(curve.points.windows(2).all(|w| w[0].date < w[1].date));
}

#[test]
fn baseline_variance_on_track_and_deleted() {
    let planned = |id: &str| BaselineTask {
        task_id: id.into(),
        planned_start: date("2024-01-01"),
        planned_end: date("2024-01-31"),
        planned_duration: 31,
        planned_progress: 0.0,
    };
    let live = vec![ScheduleTask {
        id: "T1".into(),
        name: None,
        start_date: date("2024-01-03"),
        end_date: date("2024-01-31"),
        progress: 40.0,
        is_critical: false,
        predecessors: Default::default(),
        wbs_id: None,
    }];

    let report = classify(
        &[planned("T1"), planned("T2")],
        &live,
        &VarianceConfig::default(),
    )
    .unwrap();

    let on_track = &report.per_task[0];
    assert_eq!(on_track.status, VarianceStatus::OnTrack);
    assert_eq!(on_track.end_variance, Some(0));

    let deleted = &report.per_task[1];
    assert_eq!(deleted.status, VarianceStatus::TaskDeleted);
    assert_eq!(deleted.start_variance, None);
    assert_eq!(deleted.end_variance, None);
    assert_eq!(deleted.duration_variance, None);
    assert_eq!(deleted.current_start, None);
}
