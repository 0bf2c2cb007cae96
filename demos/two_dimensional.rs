//! A trie whose values are tries: a geographic dimension (continent, country)
//! whose entries each hold an organisational dimension (division, department).

use std::fmt;

use triemap::render::{self, Datum, Writer};
use triemap::{Node, OTrieMap};

#[derive(Clone, Copy, Debug, PartialEq)]
struct Data(char);

impl Datum for Data {
    fn write(&self, w: &mut Writer<'_>) -> fmt::Result {
        self.0.write(w)
    }
}

macro_rules! name {
    ($($t:ident),*) => {
        $(
            #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
            struct $t(String);

            impl $t {
                fn new(name: &str) -> Self {
                    Self(name.to_string())
                }
            }

            impl fmt::Display for $t {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }
        )*
    };
}

name!(Continent, Country, Division, Department);

type OrgTrieMap = OTrieMap<Data, (Division, Department)>;
type GeoOrgTrieMap = OTrieMap<OrgTrieMap, (Continent, Country)>;

fn main() {
    let mut geo: GeoOrgTrieMap = Default::default();

    let (org, _) = geo.insert(
        (Continent::new("Europe"), Country::new("Ukraine")),
        Default::default(),
    );
    org.insert((Division::new("Sales"), Department::new("Retail")), Data('A'));

    for (department, data) in [("Support", 'B'), ("Consulting", 'C')] {
        let (org, _) = geo.insert(
            (Continent::new("Europe"), Country::new("Germany")),
            Default::default(),
        );
        org.insert((Division::new("Services"), Department::new(department)), Data(data));
    }

    let germany = geo
        .find((&Continent::new("Europe"), &Country::new("Germany")))
        .map(|org| org.size());
    assert_eq!(germany, Some(2));

    println!("\n2D ordered triemap as a JSON-like object.\n{}", render::like(&geo));
    println!("\n2D ordered triemap as a proper JSON object.\n{}", render::proper(&geo));
    println!("\n2D ordered triemap as a D3 JSON object.\n{}", render::d3(&geo));
}
