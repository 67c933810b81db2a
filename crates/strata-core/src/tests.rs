use strata_error::StrataError;

use crate::datatypes::AnyValue;
use crate::df;
use crate::frame::row::Row;
use crate::frame::DataFrame;

#[test]
fn test_new_requires_matching_counts() {
    let result = DataFrame::new(vec!["a".to_string()], vec![]);
    assert!(matches!(result, Err(StrataError::ShapeMismatch(_))));

    let result = df!("a" => [1i64], "a" => [2i64]);
    assert!(matches!(result, Err(StrataError::Duplicate(_))));
}

#[test]
fn test_new_normalizes_to_longest_column() {
    let df = df!(
        "long" => [1i64, 2, 3, 4],
        "short" => ["x", "y"]
    )
    .unwrap();
    assert_eq!(df.shape(), (4, 2));

    let short = df.column::<String>("short").unwrap();
    assert_eq!(short.len(), 4);
    assert_eq!(short.null_count(), 2);
    assert!(short.values()[3].is_empty());
}

#[test]
fn test_add_column_backfills_all() {
    let mut df = df!("a" => [1i64, 2]).unwrap();
    df.add_column("b", [1.0f64, 2.0, 3.0]).unwrap();
    assert_eq!(df.shape(), (3, 2));
    // The pre-existing column was padded up to the new height.
    assert_eq!(df.column::<i64>("a").unwrap().null_count(), 1);

    assert!(matches!(
        df.add_column("a", [9i64]),
        Err(StrataError::Duplicate(_))
    ));
    assert_eq!(df.column_names(), &["a".to_string(), "b".to_string()]);
}

#[test]
fn test_typed_get_column() {
    let df = df!("a" => [1i64, 2]).unwrap();
    assert!(df.column::<i64>("a").is_some());
    assert!(df.column::<f64>("a").is_none());
    assert!(df.column::<i64>("zzz").is_none());
    assert!(df.column_variant("a").is_some());
    assert!(df.column_variant("zzz").is_none());
}

#[test]
fn test_drop_column() {
    let mut df = df!("a" => [1i64], "b" => [2i64]).unwrap();
    df.drop_column("a").unwrap();
    assert_eq!(df.shape(), (1, 1));
    assert_eq!(df.column_names(), &["b".to_string()]);
    assert!(matches!(
        df.drop_column("a"),
        Err(StrataError::ColumnNotFound(_))
    ));
}

#[test]
fn test_add_row_partial() {
    let mut df = df!("id" => [1i64], "name" => ["ada"], "score" => [1.5f64]).unwrap();

    let mut row = Row::new();
    row.set("id", 2i64).unwrap();
    row.set("name", "grace").unwrap();
    df.add_row(&row).unwrap();

    assert_eq!(df.height(), 2);
    // The unmentioned column got a sentinel null.
    assert_eq!(df.column::<f64>("score").unwrap().null_count(), 1);

    let mut bad = Row::new();
    bad.set("missing", 1i64).unwrap();
    assert!(matches!(
        df.add_row(&bad),
        Err(StrataError::ColumnNotFound(_))
    ));

    let mut bad = Row::new();
    bad.set("id", "not an int").unwrap();
    assert!(matches!(df.add_row(&bad), Err(StrataError::SchemaMismatch(_))));
    // Failed appends leave the height untouched.
    assert_eq!(df.height(), 2);
}

#[test]
fn test_update_row_is_atomic() {
    let mut df = df!("id" => [1i64, 2], "name" => ["a", "b"]).unwrap();

    let mut row = Row::new();
    row.set("name", "z").unwrap();
    assert_eq!(df.update_row(1, &row).unwrap(), 1);
    assert_eq!(df.get_row(1).unwrap().at::<String>("name").unwrap(), "z");

    // A type mismatch anywhere aborts before any field is written.
    let mut row = Row::new();
    row.set("name", "changed").unwrap();
    row.set("id", 1.5f64).unwrap();
    assert!(matches!(
        df.update_row(1, &row),
        Err(StrataError::SchemaMismatch(_))
    ));
    assert_eq!(df.get_row(1).unwrap().at::<String>("name").unwrap(), "z");

    let row = Row::new();
    assert!(matches!(
        df.update_row(9, &row),
        Err(StrataError::OutOfBounds(_))
    ));
}

#[test]
fn test_get_row_preserves_sentinels() {
    let df = df!("a" => [Some(1i64), None], "b" => ["x", "y"]).unwrap();
    let row = df.get_row(1).unwrap();
    assert_eq!(row.column_names(), vec!["a", "b"]);
    assert_eq!(row.get_any("a"), Some(&AnyValue::Int64(i64::MIN)));
    assert!(matches!(df.get_row(2), Err(StrataError::OutOfBounds(_))));
}

#[test]
fn test_drop_row_adjusts_null_counts() {
    let mut df = df!("a" => [Some(1i64), None, Some(3)]).unwrap();
    df.drop_row(1).unwrap();
    assert_eq!(df.height(), 2);
    assert_eq!(df.column::<i64>("a").unwrap().null_count(), 0);
    assert!(matches!(df.drop_row(5), Err(StrataError::OutOfBounds(_))));
}

#[test]
fn test_dropna_threshold() {
    let mut df = df!(
        "a" => [Some(1i64), None, Some(3), None],
        "b" => [Some(1.0f64), Some(2.0), None, None]
    )
    .unwrap();
    // threshold 1: only rows with more than one null go.
    df.dropna(&[], 1).unwrap();
    assert_eq!(df.height(), 3);

    // threshold 0: any null drops the row.
    df.dropna(&[], 0).unwrap();
    assert_eq!(df.height(), 1);
    assert_eq!(df.column::<i64>("a").unwrap().values(), &[1]);

    assert!(matches!(
        df.dropna(&["nope"], 0),
        Err(StrataError::ColumnNotFound(_))
    ));
}

#[test]
fn test_dropna_subset_only_counts_target_columns() {
    let mut df = df!(
        "a" => [Some(1i64), None],
        "b" => [None::<i64>, Some(2)]
    )
    .unwrap();
    df.dropna(&["a"], 0).unwrap();
    assert_eq!(df.height(), 1);
    // Row 0 survived even though "b" holds a null there.
    assert!(df.column::<i64>("b").unwrap().values()[0] == i64::MIN);
}

#[test]
fn test_drop_duplicates_keeps_first_and_is_idempotent() {
    let mut df = df!(
        "a" => [1i64, 2, 1, 2, 3],
        "b" => ["x", "y", "x", "q", "z"]
    )
    .unwrap();
    df.drop_duplicates(&[]).unwrap();
    assert_eq!(df.height(), 4);

    let once = df.clone();
    df.drop_duplicates(&[]).unwrap();
    assert_eq!(df, once);

    // Subset dedup: only "a" is considered, so (2, "q") is a duplicate of
    // (2, "y").
    df.drop_duplicates(&["a"]).unwrap();
    assert_eq!(df.height(), 3);
    assert_eq!(df.column::<String>("b").unwrap().values(), &["x", "y", "z"]);
}

#[test]
fn test_ffill_bfill_subset() {
    let mut df = df!(
        "a" => [None, Some(1i64), None, Some(4)],
        "b" => [None, Some(1.5f64), None, None]
    )
    .unwrap();
    df.ffill(&["a"]).unwrap();
    assert_eq!(df.column::<i64>("a").unwrap().values(), &[i64::MIN, 1, 1, 4]);
    // "b" untouched.
    assert_eq!(df.column::<f64>("b").unwrap().null_count(), 3);

    df.bfill(&[]).unwrap();
    assert_eq!(df.column::<i64>("a").unwrap().values(), &[1, 1, 1, 4]);
    let b = df.column::<f64>("b").unwrap();
    assert_eq!(b.values()[0], 1.5);
    // Trailing nulls stay.
    assert_eq!(b.null_count(), 2);
}

#[test]
fn test_fill_null_typed() {
    let mut df = df!(
        "a" => [Some(1i64), None],
        "b" => [Some("x"), None]
    )
    .unwrap();
    df.fill_null(0i64, &[]).unwrap();
    assert_eq!(df.column::<i64>("a").unwrap().values(), &[1, 0]);
    // The string column does not match i64 and is skipped.
    assert_eq!(df.column::<String>("b").unwrap().null_count(), 1);
}

#[test]
fn test_sort_by_stable_and_descending() {
    let mut df = df!(
        "key" => [2i64, 1, 2, 1],
        "payload" => ["a", "b", "c", "d"]
    )
    .unwrap();
    df.sort_by("key", true).unwrap();
    assert_eq!(df.column::<i64>("key").unwrap().values(), &[1, 1, 2, 2]);
    // Ties keep their original relative order.
    assert_eq!(
        df.column::<String>("payload").unwrap().values(),
        &["b", "d", "a", "c"]
    );

    df.sort_by("key", false).unwrap();
    assert_eq!(df.column::<i64>("key").unwrap().values(), &[2, 2, 1, 1]);
    assert_eq!(
        df.column::<String>("payload").unwrap().values(),
        &["a", "c", "b", "d"]
    );

    assert!(matches!(
        df.sort_by("nope", true),
        Err(StrataError::ColumnNotFound(_))
    ));
}

#[test]
fn test_sort_puts_numeric_nulls_first_ascending() {
    let mut df = df!("a" => [Some(3i64), None, Some(1)]).unwrap();
    df.sort_by("a", true).unwrap();
    assert_eq!(df.column::<i64>("a").unwrap().values(), &[i64::MIN, 1, 3]);
}

#[test]
fn test_select_slice_get_last() {
    let df = df!(
        "a" => [1i64, 2, 3, 4],
        "b" => ["w", "x", "y", "z"],
        "c" => [1.0f64, 2.0, 3.0, 4.0]
    )
    .unwrap();

    let selected = df.select(&["c", "a"]).unwrap();
    assert_eq!(selected.column_names(), &["c".to_string(), "a".to_string()]);
    assert!(matches!(
        df.select(&[]),
        Err(StrataError::InvalidOperation(_))
    ));
    assert!(matches!(
        df.select(&["nope"]),
        Err(StrataError::ColumnNotFound(_))
    ));

    let sliced = df.slice(1, 3).unwrap();
    assert_eq!(sliced.height(), 2);
    assert_eq!(sliced.column::<i64>("a").unwrap().values(), &[2, 3]);
    assert!(matches!(df.slice(0, 9), Err(StrataError::OutOfBounds(_))));
    assert!(matches!(
        df.slice(2, 2),
        Err(StrataError::InvalidOperation(_))
    ));

    let last = df.get_last(2).unwrap();
    assert_eq!(last.height(), 2);
    assert_eq!(last.column_names(), df.column_names());
    assert_eq!(last.column::<String>("b").unwrap().values(), &["y", "z"]);
    assert!(matches!(df.get_last(4), Err(StrataError::OutOfBounds(_))));
}

#[test]
fn test_head_tail_clamp() {
    let df = df!("a" => [1i64, 2, 3]).unwrap();
    assert_eq!(df.head(None).height(), 3);
    assert_eq!(df.head(Some(2)).column::<i64>("a").unwrap().values(), &[1, 2]);
    assert_eq!(df.tail(Some(2)).column::<i64>("a").unwrap().values(), &[2, 3]);
    assert_eq!(DataFrame::empty().head(None).height(), 0);
}

#[test]
fn test_join_scenario() {
    let left = df!("id" => [1i64, 2, 3], "name" => ["a", "b", "c"]).unwrap();
    let right = df!("id" => [2i64, 3, 4], "score" => [20i64, 30, 40]).unwrap();

    let inner = left.inner_join(&right, &["id"]).unwrap();
    assert_eq!(inner.shape(), (2, 3));
    assert_eq!(
        inner.column_names(),
        &["id".to_string(), "name".to_string(), "score".to_string()]
    );
    assert_eq!(inner.column::<i64>("id").unwrap().values(), &[2, 3]);
    assert_eq!(inner.column::<String>("name").unwrap().values(), &["b", "c"]);
    assert_eq!(inner.column::<i64>("score").unwrap().values(), &[20, 30]);

    let left_joined = left.left_join(&right, &["id"]).unwrap();
    assert_eq!(left_joined.shape(), (3, 3));
    let scores = left_joined.column::<i64>("score").unwrap();
    assert_eq!(scores.values(), &[i64::MIN, 20, 30]);
    assert_eq!(scores.null_count(), 1);

    // right_join delegates to left_join with swapped operands.
    let right_joined = left.right_join(&right, &["id"]).unwrap();
    assert_eq!(right_joined, right.left_join(&left, &["id"]).unwrap());
    assert_eq!(
        right_joined.column_names(),
        &["id".to_string(), "score".to_string(), "name".to_string()]
    );
}

#[test]
fn test_join_emits_one_row_per_match() {
    let left = df!("k" => [1i64, 2]).unwrap();
    let right = df!("k" => [1i64, 1, 3], "v" => [10i64, 11, 12]).unwrap();
    let joined = left.inner_join(&right, &["k"]).unwrap();
    assert_eq!(joined.height(), 2);
    let mut values = joined.column::<i64>("v").unwrap().values().to_vec();
    values.sort_unstable();
    assert_eq!(values, vec![10, 11]);
}

#[test]
fn test_join_validation() {
    let left = df!("id" => [1i64], "x" => [1.0f64]).unwrap();
    let right = df!("id" => [1.0f64]).unwrap();

    assert!(matches!(
        left.inner_join(&right, &[]),
        Err(StrataError::InvalidOperation(_))
    ));
    assert!(matches!(
        left.inner_join(&right, &["zzz"]),
        Err(StrataError::ColumnNotFound(_))
    ));
    // Same name, different storable type on each side.
    assert!(matches!(
        left.inner_join(&right, &["id"]),
        Err(StrataError::SchemaMismatch(_))
    ));
}

#[test]
fn test_join_suffixes_colliding_names() {
    let left = df!("id" => [1i64], "v" => [1i64]).unwrap();
    let right = df!("id" => [1i64], "v" => [9i64]).unwrap();
    let joined = left.inner_join(&right, &["id"]).unwrap();
    assert_eq!(
        joined.column_names(),
        &["id".to_string(), "v".to_string(), "v_right".to_string()]
    );
    assert_eq!(joined.column::<i64>("v_right").unwrap().values(), &[9]);
}

#[test]
fn test_frame_aggregates() {
    let df = df!(
        "n" => [2i64, 4, 6, 8, 10],
        "s" => ["a", "b", "c", "d", "e"]
    )
    .unwrap();

    assert_eq!(df.sum("n").unwrap(), 30.0);
    assert_eq!(df.mean("n").unwrap(), 6.0);
    assert_eq!(df.median("n").unwrap(), 6.0);
    assert_eq!(df.variance("n").unwrap(), 10.0);
    assert_eq!(df.standard_deviation("n").unwrap(), 10.0f64.sqrt());
    assert_eq!(df.maximum::<i64>("n").unwrap(), 10);
    assert_eq!(df.minimum::<i64>("n").unwrap(), 2);
    assert_eq!(df.minimum::<String>("s").unwrap(), "a");

    assert!(matches!(
        df.sum("s"),
        Err(StrataError::InvalidOperation(_))
    ));
    assert!(matches!(
        df.sum("zzz"),
        Err(StrataError::ColumnNotFound(_))
    ));
    assert!(matches!(
        df.maximum::<f64>("n"),
        Err(StrataError::SchemaMismatch(_))
    ));
}

#[test]
fn test_describe() {
    let df = df!(
        "n" => [2i64, 4, 6, 8, 10],
        "s" => ["a", "b", "c", "d", "e"]
    )
    .unwrap();
    let summary = df.describe().unwrap();
    assert_eq!(
        summary.column_names(),
        &["statistic".to_string(), "n".to_string()]
    );
    assert_eq!(summary.height(), 8);
    assert_eq!(
        summary.column::<String>("statistic").unwrap().values(),
        &["count", "mean", "std", "min", "25%", "50%", "75%", "max"]
    );
    let n = summary.column::<f64>("n").unwrap().values();
    assert_eq!(n[0], 5.0); // count
    assert_eq!(n[1], 6.0); // mean
    assert_eq!(n[3], 2.0); // min
    assert_eq!(n[7], 10.0); // max

    let strings_only = df!("s" => ["x"]).unwrap();
    assert!(matches!(
        strings_only.describe(),
        Err(StrataError::InvalidOperation(_))
    ));
}

#[test]
fn test_estimated_size() {
    let df = df!("a" => [1i64, 2], "s" => ["xy", "z"]).unwrap();
    // 2 * 8 bytes of i64 plus string payloads and headers.
    assert!(df.estimated_size() >= 16 + 3);
}
