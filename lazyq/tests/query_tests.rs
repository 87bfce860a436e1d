//! End-to-end queries composed from every operator family.

use lazyq::prelude::*;
use lazyq::{Error, Variant};
use lazyq_test_utils::{Probe, init_tracing_for_tests};

#[derive(Clone, Debug, PartialEq)]
struct Employee {
    name: &'static str,
    dept: u32,
    salary: u32,
}

fn staff() -> Sequence<Employee> {
    Sequence::from_vec(vec![
        Employee { name: "Ines", dept: 2, salary: 70 },
        Employee { name: "Ravi", dept: 1, salary: 55 },
        Employee { name: "Olga", dept: 2, salary: 90 },
        Employee { name: "Mark", dept: 3, salary: 40 },
        Employee { name: "Anna", dept: 1, salary: 55 },
    ])
}

fn departments() -> Sequence<(u32, &'static str)> {
    Sequence::from_vec(vec![(1, "Ops"), (2, "Dev"), (4, "Legal")])
}

#[test]
fn test_join_order_then_take() {
    init_tracing_for_tests();
    let top = staff()
        .join(&departments(), |e| e.dept, |d| d.0, |e, d| (d.1, e.name, e.salary))
        .order_by_descending(|row| row.2)
        .then_by(|row| row.1)
        .take(3)
        .select(|row| format!("{}/{}", row.0, row.1))
        .to_vec()
        .unwrap();
    assert_eq!(top, vec!["Dev/Olga", "Dev/Ines", "Ops/Anna"]);
}

#[test]
fn test_group_join_with_aggregates() {
    let report = departments()
        .group_join(&staff(), |d| d.0, |e| e.dept, |d, members| {
            let payroll = Sequence::from_vec(members.to_vec());
            (d.1, payroll.count().unwrap(), payroll.sum_by(|e| e.salary).unwrap())
        })
        .to_vec()
        .unwrap();
    assert_eq!(report, vec![("Ops", 2, 110), ("Dev", 2, 160), ("Legal", 0, 0)]);
}

#[test]
fn test_group_by_then_order_groups() {
    let by_dept = staff()
        .group_by(|e| e.dept)
        .order_by(|g| std::cmp::Reverse(g.len()))
        .then_by(|g| *g.key())
        .select(|g| (*g.key(), g.len()))
        .to_vec()
        .unwrap();
    assert_eq!(by_dept, vec![(1, 2), (2, 2), (3, 1)]);
}

#[test]
fn test_set_ops_and_quantifiers() {
    let salaries = staff().select(|e| e.salary);
    let distinct = salaries.distinct().order_by(|s| *s).to_vec().unwrap();
    assert_eq!(distinct, vec![40, 55, 70, 90]);

    let above_fifty = salaries.filter(|s| *s > 50);
    assert!(above_fifty.all(|s| *s >= 55).unwrap());
    assert!(!above_fifty.contains(&40).unwrap());
    assert_eq!(
        salaries.except(&above_fifty).to_vec().unwrap(),
        vec![40]
    );
}

#[test]
fn test_variant_source_cast_and_of_type() {
    let raw = Sequence::from_vec(vec![
        Variant::Int(4),
        Variant::Text("n/a".into()),
        Variant::Int(6),
        Variant::Null,
    ]);
    assert_eq!(raw.of_type::<i64>().average().unwrap(), 5.0);
    assert!(matches!(
        raw.cast::<i64>().sum(),
        Err(Error::InvalidCast { from: "Text", .. })
    ));
}

#[test]
fn test_lazy_until_terminal() {
    let probe = Probe::new(vec![3, 1, 2]);
    let query = probe
        .sequence()
        .order_by(|x| *x)
        .select(|x| x * 2)
        .reverse()
        .distinct();
    assert_eq!(probe.stats().starts(), 0);
    assert_eq!(query.first().unwrap(), 6);
    assert_eq!(probe.stats().starts(), 1);
    assert_eq!(probe.stats().disposes(), 1);
}

#[test]
fn test_element_access_errors() {
    let names = staff().select(|e| e.name);
    assert_eq!(names.element_at(1).unwrap(), "Ravi");
    assert_eq!(
        names.element_at(9),
        Err(Error::IndexOutOfRange { index: 9, len: 5 })
    );
    assert_eq!(
        names.single_by(|n| n.starts_with('Z')),
        Err(Error::NoMatch)
    );
    assert_eq!(names.last_by(|n| n.starts_with('A')).unwrap(), "Anna");
}

#[test]
fn test_interleaved_traversals_of_a_pipeline() {
    let probe = Probe::new(vec![5, 3, 8, 3, 1, 8, 2]);
    let query = probe
        .sequence()
        .filter(|x| *x > 1)
        .select(|x| x * 10)
        .order_by(|x| *x)
        .distinct();

    let mut a = query.traverse();
    let mut b = query.traverse();
    assert_eq!(a.advance().unwrap(), Some(20));
    assert_eq!(a.advance().unwrap(), Some(30));
    assert_eq!(b.advance().unwrap(), Some(20));
    assert_eq!(probe.stats().starts(), 2);
    assert_eq!(a.advance().unwrap(), Some(50));
    assert_eq!(b.advance().unwrap(), Some(30));
    assert_eq!(b.advance().unwrap(), Some(50));
    assert_eq!(a.advance().unwrap(), Some(80));
    assert_eq!(a.advance().unwrap(), None);
    assert_eq!(b.advance().unwrap(), Some(80));
    assert_eq!(b.advance().unwrap(), None);
    assert_eq!(probe.stats().disposes(), 2);
}
