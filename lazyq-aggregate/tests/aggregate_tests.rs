//! Integration tests for aggregation over instrumented sources.

use lazyq_aggregate::{NullableAggregateExt, SequenceAggregateExt};
use lazyq_result::Error;
use lazyq_seq::Sequence;
use lazyq_test_utils::{Probe, init_tracing_for_tests};
use lazyq_types::Variant;

#[test]
fn test_count_fast_path_skips_traversal() {
    init_tracing_for_tests();
    let probe = Probe::new(vec![1, 2, 3]);
    let mapped = Sequence::from_vec(vec![10, 20, 30, 40]).select(|x| x / 10);
    assert_eq!(mapped.count().unwrap(), 4);

    // Opaque sources are walked once, without buffering.
    assert_eq!(probe.sequence().filter(|x| *x > 1).count().unwrap(), 2);
    assert_eq!(probe.stats().starts(), 1);
    assert_eq!(probe.stats().pulls(), 3);
}

#[test]
fn test_count_of_cast_converts_every_element() {
    let mixed = Sequence::from_vec(vec![Variant::Int(1), Variant::from("x")]);
    let ints = mixed.cast::<i64>();
    assert!(matches!(ints.count(), Err(Error::InvalidCast { .. })));
    assert!(matches!(ints.long_count(), Err(Error::InvalidCast { .. })));
    assert_eq!(mixed.of_type::<i64>().count().unwrap(), 1);
}

#[test]
fn test_source_error_surfaces_from_terminal_call() {
    let probe = Probe::new(vec![1, 2, 3]).failing_at(1);
    let err = probe.sequence().sum().unwrap_err();
    assert!(matches!(err, Error::Internal(_)));
    assert_eq!(probe.stats().disposes(), 1);
}

#[test]
fn test_empty_source_failure_modes() {
    let empty = Probe::new(Vec::<i64>::new()).sequence();
    assert_eq!(empty.sum().unwrap(), 0);
    assert_eq!(empty.min(), Err(Error::EmptySequence));
    assert_eq!(empty.max(), Err(Error::EmptySequence));
    assert_eq!(empty.average(), Err(Error::EmptySequence));
    assert_eq!(empty.aggregate(|a, b| a + b), Err(Error::EmptySequence));
    assert_eq!(empty.count().unwrap(), 0);
}

#[test]
fn test_grouped_totals() {
    let sales = Sequence::from_vec(vec![
        ("north", 120u64),
        ("south", 80),
        ("north", 30),
        ("east", 5),
        ("south", 20),
    ]);
    let totals = sales
        .group_by(|s| s.0)
        .select(|g| {
            let amounts = Sequence::from_grouping(&g).select(|s| s.1);
            (*g.key(), amounts.sum().unwrap(), amounts.max().unwrap())
        })
        .to_vec()
        .unwrap();
    assert_eq!(
        totals,
        vec![("north", 150, 120), ("south", 100, 80), ("east", 5, 5)]
    );
}

#[test]
fn test_nullable_average_of_projection() {
    let readings = Sequence::from_vec(vec!["3", "x", "5", ""]);
    let parsed = readings.select(|s| s.parse::<i32>().ok());
    assert_eq!(parsed.average_nullable().unwrap(), Some(4.0));
    assert_eq!(parsed.max_nullable().unwrap(), Some(5));
}
