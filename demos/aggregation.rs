//! Resource limits tracked per division, department and user, updated along the
//! path of whoever acquires or releases.
//!
//! Run with `-v` to print the limits after each step.

use std::fmt;

use triemap::render::{Datum, Writer};
use triemap::{algo, Flow, Node, UTrieMap};

struct Person {
    id: &'static str,
    division: &'static str,
    department: &'static str,
}

const PEOPLE: [Person; 4] = [
    Person { id: "001", division: "Sales", department: "Retail" },
    Person { id: "002", division: "Services", department: "Support" },
    Person { id: "003", division: "Services", department: "Support" },
    Person { id: "004", division: "Services", department: "Consulting" },
];

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Limit {
    threshold: u64,
    utilization: u64,
}

impl Limit {
    fn new(threshold: u64) -> Self {
        Self {
            threshold,
            utilization: 0,
        }
    }
}

impl Datum for Limit {
    const TAG: &'static str = "limit";

    fn write(&self, w: &mut Writer<'_>) -> fmt::Result {
        w.quoted(&format!("{}/{}", self.utilization, self.threshold))
    }
}

type Limits = UTrieMap<Limit, (String, String, String)>;

// Refuses the whole request if any level on the way would exceed its threshold.
fn acquire(limits: &mut Limits, p: &Person, amount: u64) -> bool {
    let path = (p.division, p.department, p.id);
    let mut fits = true;
    limits.climb_pre(path, |node| {
        if let Some(limit) = node.data() {
            fits = limit.utilization + amount <= limit.threshold;
        }
        Flow::from(fits)
    });
    if fits {
        limits.climb_pre_mut(path, |node| {
            if let Some(limit) = node.data_mut() {
                limit.utilization += amount;
            }
            Flow::Continue
        });
    }
    fits
}

fn release(limits: &mut Limits, p: &Person, amount: u64) {
    limits.climb_pre_mut((p.division, p.department, p.id), |node| {
        if let Some(limit) = node.data_mut() {
            limit.utilization = limit.utilization.saturating_sub(amount);
        }
        Flow::Continue
    });
}

fn utilization(limits: &Limits, path: (&str, &str)) -> Option<u64> {
    limits.find(path).map(|l| l.utilization)
}

fn main() {
    let verbose = std::env::args().nth(1).as_deref() == Some("-v");

    let mut limits: Limits = Default::default();
    for p in &PEOPLE {
        limits.insert((p.division, p.department, p.id), Limit::new(1_000));
        limits.insert((p.division, p.department), Limit::new(100_000));
        limits.insert((p.division,), Limit::new(10_000_000));
    }
    limits.insert((), Limit::new(100_000_000));
    // Four users, three departments, two divisions and the global limit.
    assert_eq!(limits.size(), 4 + 3 + 2 + 1);

    for p in &PEOPLE {
        assert!(acquire(&mut limits, p, 100));
    }
    assert_eq!(utilization(&limits, ("Services", "Support")), Some(200));
    assert_eq!(limits.find(("Services",)).map(|l| l.utilization), Some(300));
    assert_eq!(limits.find(()).map(|l| l.utilization), Some(400));
    if verbose {
        println!("After acquire:\n{}", limits);
    }

    // A user level threshold stops the request before anything is charged.
    assert!(!acquire(&mut limits, &PEOPLE[0], 1_000));
    assert_eq!(limits.find(()).map(|l| l.utilization), Some(400));

    for p in &PEOPLE {
        release(&mut limits, p, 50);
    }
    assert_eq!(utilization(&limits, ("Services", "Consulting")), Some(50));
    assert_eq!(limits.find(()).map(|l| l.utilization), Some(200));

    for p in &PEOPLE {
        release(&mut limits, p, 50);
    }
    limits.traverse_pre(|node, _| {
        assert_eq!(node.data().map(|l| l.utilization), Some(0));
        Flow::Continue
    });
    if verbose {
        println!("After release:\n{}", limits);
    }

    // Plain counters can use the checked helpers instead.
    let mut counters: UTrieMap<u64, (String, String)> = Default::default();
    counters.insert((), 0);
    counters.insert(("Sales",), 0);
    counters.insert(("Sales", "Retail"), 0);
    assert_eq!(algo::charge(&mut counters, ("Sales", "Retail"), 7), Some(3));
    assert_eq!(algo::discharge(&mut counters, ("Sales",), 8), None);
    assert_eq!(counters.find(()), Some(&7));

    println!("All good.");
}
