#![no_main]

use bookshelf::naming::{PatternRegistry, natural_cmp};
use bookshelf::ordering::{CollectionOrderer, OrderingStrategy};
use libfuzzer_sys::fuzz_target;
use std::cmp::Ordering;
use std::path::PathBuf;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);
    let names: Vec<&str> = s.lines().collect();

    // The comparator must be antisymmetric.
    for pair in names.windows(2) {
        let forward = natural_cmp(pair[0], pair[1]);
        let backward = natural_cmp(pair[1], pair[0]);
        assert_eq!(forward, backward.reverse());
        if pair[0] == pair[1] {
            assert_eq!(forward, Ordering::Equal);
        }
    }

    let files: Vec<PathBuf> = names
        .iter()
        .map(|n| PathBuf::from(format!("{n}.pdf")))
        .collect();
    let registry = PatternRegistry::new();

    for strategy in [
        OrderingStrategy::Auto,
        OrderingStrategy::Semantic,
        OrderingStrategy::Alphabetic,
    ] {
        let orderer = CollectionOrderer::new(&registry, strategy, None).unwrap();
        let ordered = orderer.order(&files);

        // Nothing is invented and nothing is lost.
        assert!(ordered.files.iter().all(|f| files.contains(f)));
        assert!(
            files
                .iter()
                .all(|f| ordered.files.contains(f) || ordered.dropped.contains(f))
        );
    }
});
