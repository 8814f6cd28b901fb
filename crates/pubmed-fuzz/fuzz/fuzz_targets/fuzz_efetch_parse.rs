#![no_main]

use libfuzzer_sys::fuzz_target;
use pubmed_affiliations::client::parse_article_set;

fuzz_target!(|data: &[u8]| {
    let Ok(xml) = std::str::from_utf8(data) else {
        return;
    };

    // Malformed input must come back as an error with whatever was recovered.
    match parse_article_set(xml) {
        Ok(records) => {
            for record in &records {
                assert!(!record.pubmed_id.is_empty());
                assert!(!record.title.is_empty());
            }
        }
        Err(partial) => {
            let _ = partial.to_string();
        }
    }
});
