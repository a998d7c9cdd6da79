#![no_main]
use libfuzzer_sys::fuzz_target;
use netblock::address::{parse, parse_network};
use netblock::{LinearIndex, PrefixIndex, PrefixRecord, TrieIndex};

// Input is newline-separated: CIDR lines build the catalogue, the rest are queries.
// Both backends must report the same match set for every query.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let mut linear = LinearIndex::new();
    let mut trie = TrieIndex::new();
    let mut queries = Vec::new();

    for (i, line) in text.lines().enumerate() {
        if line.contains('/') {
            if let Ok(network) = parse_network(line) {
                let record = PrefixRecord::new(network, format!("P{}", i), ["fuzz"]);
                linear.add(record.clone());
                trie.add(record);
            }
        } else if let Ok(addr) = parse(line) {
            queries.push(addr);
        }
    }

    for addr in &queries {
        let mut expected: Vec<_> = linear.lookup(addr).iter().map(|r| r.provider()).collect();
        let mut actual: Vec<_> = trie.lookup(addr).iter().map(|r| r.provider()).collect();
        expected.sort_unstable();
        actual.sort_unstable();
        assert_eq!(expected, actual, "backends disagree for {}", addr);
    }
});
