#![no_main]

use libfuzzer_sys::fuzz_target;
use pubmed_affiliations::filter::{explain, is_non_academic};

fuzz_target!(|affiliation: &str| {
    let verdict = is_non_academic(affiliation);
    assert_eq!(verdict, explain(affiliation).is_non_academic());
});
