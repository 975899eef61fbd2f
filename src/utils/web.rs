use xxhrs::XXH3_64;

// Content-addressed page identifier: 64-bit XXH3 of the URL bytes. PageDb
// and the schedule key on the same hash.
pub fn page_hash(url: &str) -> u64 {
    XXH3_64::hash(url.as_bytes())
}
