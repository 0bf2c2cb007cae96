//! Named features switched on and off per division, department and user.
//!
//! Run with `-v` to print the final flags.

use triemap::{Node, UTrieMap};

struct Person {
    id: &'static str,
    first: &'static str,
    last: &'static str,
    division: &'static str,
    department: &'static str,
}

const PEOPLE: [Person; 4] = [
    Person { id: "001", first: "Mary", last: "Moe", division: "Sales", department: "Retail" },
    Person { id: "002", first: "John", last: "Doe", division: "Services", department: "Support" },
    Person { id: "003", first: "Jill", last: "Noe", division: "Services", department: "Support" },
    Person { id: "004", first: "Jane", last: "Poe", division: "Services", department: "Consulting" },
];

// Feature, division, department, user id.
type FeatureFlags = UTrieMap<bool, (String, String, String, String)>;

fn check(feature: &str, flags: &FeatureFlags) -> Vec<bool> {
    let enabled: Vec<bool> = PEOPLE
        .iter()
        .map(|p| *flags.nearest((feature, p.division, p.department, p.id)).unwrap_or(&false))
        .collect();
    for (p, on) in PEOPLE.iter().zip(&enabled) {
        println!(
            "{} {} ({}) {} use {}",
            p.first,
            p.last,
            p.id,
            if *on { "can" } else { "can't" },
            feature
        );
    }
    println!();
    enabled
}

fn main() {
    let verbose = std::env::args().nth(1).as_deref() == Some("-v");

    let mut flags: FeatureFlags = Default::default();
    let feature = "Text-Notification";

    // Only one member of Support at first.
    flags.insert((feature, "Services", "Support", "003"), true);
    assert_eq!(check(feature, &flags), [false, false, true, false]);

    // Then the whole Services division.
    flags.insert((feature, "Services"), true);
    assert_eq!(check(feature, &flags), [false, true, true, true]);

    // Then everyone.
    flags.insert((feature,), true);
    assert_eq!(check(feature, &flags), [true, true, true, true]);

    // Until Consulting asks to have it removed.
    flags.insert((feature, "Services", "Consulting"), false);
    assert_eq!(check(feature, &flags), [true, true, true, false]);

    if verbose {
        println!("Feature flags:\n{}", flags);
    }
}
