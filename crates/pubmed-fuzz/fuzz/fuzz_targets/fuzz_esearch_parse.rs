#![no_main]

use libfuzzer_sys::fuzz_target;
use pubmed_affiliations::models::ESearchResponse;

fuzz_target!(|data: &[u8]| {
    if let Ok(response) = serde_json::from_slice::<ESearchResponse>(data) {
        let _ = response.error_message();
        let _ = response.into_ids();
    }
});
