extern crate proptest;
extern crate tuple_diagnostics;

use proptest::prelude::*;

use tuple_diagnostics::{build_prefix, parse_format};

fn arb_row() -> impl Strategy<Value = (u32, i64, String)> {
    (any::<u32>(), any::<i64>(), "[a-z]{0,6}")
}

proptest! {
    #[test]
    fn prefixes_sort_like_their_literals(lhs in arb_row(), rhs in arb_row()) {
        let schema = parse_format("uint32,int64,string").unwrap();
        let lhs_prefix = build_prefix(&schema, &format!("{},{},{}", lhs.0, lhs.1, lhs.2)).unwrap();
        let rhs_prefix = build_prefix(&schema, &format!("{},{},{}", rhs.0, rhs.1, rhs.2)).unwrap();
        prop_assert_eq!(lhs.cmp(&rhs), lhs_prefix.cmp(&rhs_prefix));
    }

    #[test]
    fn shorter_prefix_is_a_prefix(row in arb_row()) {
        let schema = parse_format("uint32,int64,string").unwrap();
        let one = build_prefix(&schema, &format!("{}", row.0)).unwrap();
        let two = build_prefix(&schema, &format!("{},{}", row.0, row.1)).unwrap();
        let three = build_prefix(&schema, &format!("{},{},{}", row.0, row.1, row.2)).unwrap();
        prop_assert!(two.starts_with(&one));
        prop_assert!(three.starts_with(&two));
    }
}
