//! Equality Grouping
//!
//! Partitions the candidates of one benchmark configuration into groups of
//! mutually-compatible output, then computes within-group ratios against the
//! fastest member.
//!
//! **Critical Design Decision**: grouping uses an anchor rule, not transitive
//! clustering. A candidate joins the first existing group whose *anchor*
//! (founding member) compares equal to it; otherwise it founds a new group.
//! Group ids follow discovery order. Membership is therefore order-dependent
//! when the injected comparator is non-transitive, and that behavior is part
//! of the observable contract — do not "fix" this into union-find.

use std::panic::{AssertUnwindSafe, catch_unwind};

/// Outcome of comparing two captured call results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    /// Whether the two results are considered equivalent
    pub equal: bool,
    /// Optional human-readable description of the difference
    pub detail: Option<String>,
}

impl Comparison {
    /// The two results are equivalent.
    pub fn equal() -> Self {
        Self {
            equal: true,
            detail: None,
        }
    }

    /// The two results differ, with a description of the delta.
    pub fn different(detail: impl Into<String>) -> Self {
        Self {
            equal: false,
            detail: Some(detail.into()),
        }
    }

    /// Build from a plain boolean verdict.
    pub fn from_bool(equal: bool) -> Self {
        Self {
            equal,
            detail: None,
        }
    }
}

/// The default comparator: plain value equality.
pub fn value_equality<T: PartialEq>(a: &T, b: &T) -> Comparison {
    Comparison::from_bool(a == b)
}

/// One equality group, by candidate index into the grouping input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EqualityGroup {
    /// Sequential id in discovery order (0-based)
    pub id: usize,
    /// Index of the founding member all joiners were compared against
    pub anchor: usize,
    /// Index of the lowest-median member; its ratio is 1.00
    pub baseline: usize,
    /// Member indices in input order (anchor first)
    pub members: Vec<usize>,
}

/// Per-candidate grouping verdict, parallel to the grouping input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupAssignment {
    /// Id of the group this candidate belongs to
    pub group_id: usize,
    /// Median relative to the group baseline's median (baseline = 1.00)
    pub ratio: f64,
    /// Whether this candidate is its group's baseline
    pub is_baseline: bool,
}

/// Result of grouping one configuration's candidates.
#[derive(Debug, Clone)]
pub struct GroupingOutcome {
    /// Groups in discovery order; `groups[i].id == i`
    pub groups: Vec<EqualityGroup>,
    /// One assignment per input candidate, in input order
    pub assignments: Vec<GroupAssignment>,
}

/// Partition candidates by output equivalence and grade them within groups.
///
/// `results[i]` and `medians[i]` describe the same candidate; input order is
/// the discovery order. A comparator that panics is treated as "not equal"
/// for that pair, so dissimilar results split rather than silently merge.
/// Grouping itself never fails.
///
/// # Panics
///
/// Panics if `results` and `medians` disagree in length.
pub fn group_by_equality<T>(
    results: &[&T],
    medians: &[f64],
    compare: &dyn Fn(&T, &T) -> Comparison,
) -> GroupingOutcome {
    assert_eq!(
        results.len(),
        medians.len(),
        "one median per call result required"
    );

    let mut groups: Vec<EqualityGroup> = Vec::new();

    for idx in 0..results.len() {
        let joined = groups
            .iter()
            .position(|g| compare_guarded(compare, results[g.anchor], results[idx]).equal);

        match joined {
            Some(position) => groups[position].members.push(idx),
            None => groups.push(EqualityGroup {
                id: groups.len(),
                anchor: idx,
                baseline: idx,
                members: vec![idx],
            }),
        }
    }

    // Grade each group against its fastest member. Ties keep the earliest
    // candidate as baseline.
    let mut assignments = vec![
        GroupAssignment {
            group_id: 0,
            ratio: 1.0,
            is_baseline: false,
        };
        results.len()
    ];

    for group in &mut groups {
        // Strict less-than keeps the earliest member as baseline on ties
        let mut baseline = group.anchor;
        for &member in &group.members {
            if medians[member] < medians[baseline] {
                baseline = member;
            }
        }
        group.baseline = baseline;

        let baseline_median = medians[baseline];
        for &member in &group.members {
            let ratio = if member == baseline || baseline_median <= 0.0 {
                1.0
            } else {
                medians[member] / baseline_median
            };
            assignments[member] = GroupAssignment {
                group_id: group.id,
                ratio,
                is_baseline: member == baseline,
            };
        }
    }

    GroupingOutcome {
        groups,
        assignments,
    }
}

/// Run the comparator, converting a panic into "not equal".
fn compare_guarded<T>(compare: &dyn Fn(&T, &T) -> Comparison, a: &T, b: &T) -> Comparison {
    catch_unwind(AssertUnwindSafe(|| compare(a, b)))
        .unwrap_or_else(|_| Comparison::different("comparator panicked"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group<T: PartialEq>(results: &[&T], medians: &[f64]) -> GroupingOutcome {
        group_by_equality(results, medians, &value_equality)
    }

    #[test]
    fn equal_results_share_a_group_with_ratios() {
        // A (100ns, 10), B (300ns, 10), C (80ns, 99): two groups expected.
        let results = [&10, &10, &99];
        let medians = [100.0, 300.0, 80.0];

        let outcome = group(&results, &medians);

        assert_eq!(outcome.groups.len(), 2);
        assert_eq!(outcome.groups[0].members, vec![0, 1]);
        assert_eq!(outcome.groups[0].baseline, 0);
        assert_eq!(outcome.groups[1].members, vec![2]);

        let [a, b, c] = [
            outcome.assignments[0],
            outcome.assignments[1],
            outcome.assignments[2],
        ];
        assert_eq!(a.group_id, 0);
        assert!(a.is_baseline);
        assert!((a.ratio - 1.0).abs() < f64::EPSILON);
        assert_eq!(b.group_id, 0);
        assert!(!b.is_baseline);
        assert!((b.ratio - 3.0).abs() < 1e-9);
        assert_eq!(c.group_id, 1);
        assert!(c.is_baseline);
        assert!((c.ratio - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn single_candidate_forms_its_own_group() {
        let outcome = group(&[&42], &[123.0]);
        assert_eq!(outcome.groups.len(), 1);
        assert!(outcome.assignments[0].is_baseline);
        assert!((outcome.assignments[0].ratio - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn group_ids_follow_discovery_order() {
        // Slowest first: discovery order, not speed, decides ids.
        let results = [&"b", &"a", &"b", &"a"];
        let medians = [400.0, 300.0, 200.0, 100.0];

        let outcome = group(&results, &medians);

        assert_eq!(outcome.groups.len(), 2);
        assert_eq!(outcome.assignments[0].group_id, 0); // "b" seen first
        assert_eq!(outcome.assignments[1].group_id, 1);
        assert_eq!(outcome.assignments[2].group_id, 0);
        assert_eq!(outcome.assignments[3].group_id, 1);

        // Baselines are the fastest within each group regardless of order.
        assert!(outcome.assignments[2].is_baseline);
        assert!(outcome.assignments[3].is_baseline);
        assert!((outcome.assignments[0].ratio - 2.0).abs() < 1e-9);
        assert!((outcome.assignments[1].ratio - 3.0).abs() < 1e-9);
    }

    #[test]
    fn anchor_rule_is_order_dependent() {
        // Comparator where values within distance 1 are "equal": 0~1 and 1~2
        // but NOT 0~2. With anchor semantics, 2 is compared against the
        // anchor 0 only, so it founds a second group. Union-find would have
        // merged all three — that would be a contract violation.
        let near = |a: &i64, b: &i64| Comparison::from_bool((a - b).abs() <= 1);
        let results: Vec<&i64> = vec![&0, &1, &2];
        let medians = [100.0, 100.0, 100.0];

        let outcome = group_by_equality(&results, &medians, &near);

        assert_eq!(outcome.groups.len(), 2);
        assert_eq!(outcome.groups[0].members, vec![0, 1]);
        assert_eq!(outcome.groups[1].members, vec![2]);
    }

    #[test]
    fn panicking_comparator_splits_groups() {
        let explosive = |_: &i32, _: &i32| -> Comparison { panic!("bad comparator") };
        let results = [&1, &1];
        let medians = [100.0, 100.0];

        let outcome = group_by_equality(&results, &medians, &explosive);

        // Conservative: forced apart, not silently merged.
        assert_eq!(outcome.groups.len(), 2);
        assert!(outcome.assignments.iter().all(|a| a.is_baseline));
    }

    #[test]
    fn tied_medians_keep_first_candidate_as_baseline() {
        let results = [&7, &7];
        let medians = [100.0, 100.0];

        let outcome = group(&results, &medians);

        assert!(outcome.assignments[0].is_baseline);
        assert!(!outcome.assignments[1].is_baseline);
        assert!((outcome.assignments[1].ratio - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_baseline_median_degrades_to_unit_ratio() {
        let results = [&1, &1];
        let medians = [0.0, 50.0];

        let outcome = group(&results, &medians);

        assert!((outcome.assignments[1].ratio - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_input_yields_no_groups() {
        let results: Vec<&i32> = Vec::new();
        let outcome = group(&results, &[]);
        assert!(outcome.groups.is_empty());
        assert!(outcome.assignments.is_empty());
    }
}
