//! The scripted demo, as shipped and corrected

use orgtree::domain::DescribeRecord;
use orgtree::scenario::{run_demo, Attachment, DemoScenario};

fn names(records: &[DescribeRecord]) -> Vec<&str> {
    records.iter().map(|r| r.name.as_str()).collect()
}

#[test]
fn given_as_shipped_demo_when_running_then_compensation_staff_under_peter() {
    let sections = run_demo(Attachment::AsShipped).unwrap();

    assert_eq!(sections.len(), 4);
    let full = &sections[0].records;
    assert_eq!(
        names(full),
        vec!["Tom", "Peter", "John", "Daniel", "Maggie", "Amy", "Allen", "Alex"]
    );
    let depths: Vec<usize> = full.iter().map(|r| r.depth).collect();
    assert_eq!(depths, vec![0, 1, 2, 2, 2, 2, 2, 1]);

    assert_eq!(names(&sections[1].records), vec!["Tom", "Alex"]);
    assert_eq!(names(&sections[2].records), vec!["Alex"]);
    assert_eq!(names(&sections[3].records), vec!["John"]);
}

#[test]
fn given_corrected_demo_when_running_then_alex_keeps_his_team() {
    let sections = run_demo(Attachment::Corrected).unwrap();

    assert_eq!(
        names(&sections[0].records),
        vec!["Tom", "Peter", "John", "Daniel", "Alex", "Maggie", "Amy", "Allen"]
    );
    assert_eq!(
        names(&sections[1].records),
        vec!["Tom", "Alex", "Maggie", "Amy", "Allen"]
    );
    assert_eq!(
        names(&sections[2].records),
        vec!["Alex", "Maggie", "Amy", "Allen"]
    );
    assert_eq!(sections[2].records[1].depth, 1);
}

#[test]
fn given_demo_after_run_when_describing_removed_manager_then_subtree_survives() {
    let mut demo = DemoScenario::build(Attachment::AsShipped).unwrap();
    demo.run().unwrap();

    let peter = demo.tree.describe(demo.handles.manager1).unwrap();
    assert_eq!(peter.len(), 6);
    assert_eq!(peter[0].department, "Audit Committee");
    assert!(demo.tree.parents(demo.handles.manager1).unwrap().is_empty());
    assert_eq!(demo.tree.roots(), vec![demo.handles.manager1, demo.handles.ceo]);
}
