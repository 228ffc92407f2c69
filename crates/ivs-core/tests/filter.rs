//! Property tests for wave filtering.

use std::collections::BTreeSet;

use polars::prelude::df;
use proptest::prelude::*;

use ivs_core::filter_waves;
use ivs_model::SourceSpec;

proptest! {
    #[test]
    fn filter_keeps_exactly_the_requested_waves(
        codes in prop::collection::vec(0i64..10, 0..60),
        waves in prop::collection::btree_set(0i64..10, 0..=5),
    ) {
        let rows: Vec<i64> = (0..codes.len() as i64).collect();
        let frame = df! {
            "s002" => codes.clone(),
            "row" => rows,
        }
        .unwrap();
        let spec = SourceSpec::new("WVS", "s002", waves.clone());

        let filtered = filter_waves(&frame, &spec).unwrap();

        let expected = codes.iter().filter(|code| waves.contains(code)).count();
        prop_assert_eq!(filtered.height(), expected);

        let kept: BTreeSet<i64> = filtered
            .column("s002")
            .unwrap()
            .i64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        prop_assert!(kept.is_subset(&waves));

        // Surviving rows keep their original relative order
        let kept_rows: Vec<i64> = filtered
            .column("row")
            .unwrap()
            .i64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        prop_assert!(kept_rows.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
