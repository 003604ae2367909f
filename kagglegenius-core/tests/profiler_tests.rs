use kagglegenius_core::profiler::{profile_csv, profile_file, SAMPLE_ROW_LIMIT, SAMPLE_VALUE_LIMIT};
use kagglegenius_core::{ColumnType, ParseError};
use proptest::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_reference_example() {
    let snapshot = profile_csv("a,b\n1,x\n2,y\n3,x\n").unwrap();
    assert_eq!(snapshot.row_count, 3);

    let a = &snapshot.columns[0];
    assert_eq!(a.name, "a");
    assert_eq!(a.column_type(), ColumnType::Numeric);
    assert_eq!(a.mean(), Some(2.0));
    assert_eq!(a.stats.unique_count, 3);
    assert_eq!(a.stats.missing_count, 0);

    let b = &snapshot.columns[1];
    assert_eq!(b.column_type(), ColumnType::Categorical);
    assert_eq!(b.stats.unique_count, 2);
    assert_eq!(b.stats.missing_count, 0);
    assert_eq!(b.mean(), None);
}

#[test]
fn test_numeric_mean_with_mixed_forms() {
    let snapshot = profile_csv("v\n3\n4.5\n-2\n").unwrap();
    let v = &snapshot.columns[0];
    assert_eq!(v.column_type(), ColumnType::Numeric);
    assert_eq!(v.mean(), Some(5.5 / 3.0));
}

#[test]
fn test_two_distinct_values_are_categorical() {
    let snapshot = profile_csv("sex\nmale\nfemale\nmale\nfemale\nmale\n").unwrap();
    let sex = &snapshot.columns[0];
    assert_eq!(sex.column_type(), ColumnType::Categorical);
    assert_eq!(sex.stats.unique_count, 2);
}

#[test]
fn test_long_first_value_is_text() {
    let long = "word ".repeat(30);
    let csv = format!("review\n{}\nshort\n", long.trim());
    let snapshot = profile_csv(&csv).unwrap();
    assert_eq!(snapshot.columns[0].column_type(), ColumnType::Text);
}

#[test]
fn test_missing_markers_and_counts() {
    let snapshot = profile_csv("v,w\n1,a\nNaN,\nnull,b\n4,NULL\n,c\n").unwrap();
    assert_eq!(snapshot.row_count, 5);

    let v = &snapshot.columns[0];
    assert_eq!(v.stats.missing_count, 3);
    assert_eq!(v.column_type(), ColumnType::Numeric);
    assert_eq!(v.mean(), Some(2.5));
    assert_eq!(v.sample_values, vec!["1", "4"]);

    // "NULL" is an ordinary value.
    let w = &snapshot.columns[1];
    assert_eq!(w.stats.missing_count, 1);
    assert_eq!(w.stats.unique_count, 4);
}

#[test]
fn test_empty_input_fails() {
    assert!(matches!(profile_csv(""), Err(ParseError::Empty)));
    assert!(matches!(profile_csv("\n  \n\t\n"), Err(ParseError::Empty)));
}

#[test]
fn test_header_only_yields_zero_rows() {
    let snapshot = profile_csv("a,b\n").unwrap();
    assert_eq!(snapshot.row_count, 0);
    assert_eq!(snapshot.columns.len(), 2);
    assert!(snapshot.sample_rows.is_empty());
    for column in &snapshot.columns {
        assert_eq!(column.column_type(), ColumnType::Unknown);
        assert_eq!(column.stats.missing_count, 0);
        assert_eq!(column.stats.unique_count, 0);
        assert_eq!(column.mean(), None);
    }
}

#[test]
fn test_all_missing_column_is_unknown() {
    let snapshot = profile_csv("id,notes\n1,\n2,NaN\n3,null\n").unwrap();
    let notes = &snapshot.columns[1];
    assert_eq!(notes.column_type(), ColumnType::Unknown);
    assert_eq!(notes.stats.missing_count, 3);
    assert_eq!(notes.mean(), None);
    assert!(notes.sample_values.is_empty());
}

#[test]
fn test_blank_lines_do_not_count_as_rows() {
    let snapshot = profile_csv("\n\na,b\n1,2\n\n   \n3,4\n\n").unwrap();
    assert_eq!(snapshot.row_count, 2);
    assert_eq!(snapshot.columns[0].name, "a");
}

#[test]
fn test_short_rows_count_trailing_values_as_missing() {
    let snapshot = profile_csv("a,b,c\n1,2,3\n4\n5,6\n").unwrap();
    assert_eq!(snapshot.row_count, 3);
    assert_eq!(snapshot.columns[1].stats.missing_count, 1);
    assert_eq!(snapshot.columns[2].stats.missing_count, 2);
    assert_eq!(snapshot.sample_rows[1].get("a"), Some("4"));
    assert_eq!(snapshot.sample_rows[1].get("b"), None);
}

#[test]
fn test_extra_fields_are_ignored() {
    let snapshot = profile_csv("a\n1,extra\n2\n").unwrap();
    assert_eq!(snapshot.columns.len(), 1);
    assert_eq!(snapshot.columns[0].mean(), Some(1.5));
}

#[test]
fn test_fields_and_header_are_trimmed() {
    let snapshot = profile_csv(" name , score \n alice , 10 \nbob,  20\n").unwrap();
    assert_eq!(snapshot.columns[0].name, "name");
    assert_eq!(snapshot.columns[1].name, "score");
    assert_eq!(snapshot.columns[0].sample_values, vec!["alice", "bob"]);
    assert_eq!(snapshot.columns[1].mean(), Some(15.0));
}

#[test]
fn test_quotes_are_not_interpreted() {
    let snapshot = profile_csv("city,pop\n\"Paris, France\",2\n").unwrap();
    // The quoted comma splits the field; the known tokenizer limitation.
    assert_eq!(snapshot.columns[0].sample_values, vec!["\"Paris"]);
    assert_eq!(snapshot.columns[1].sample_values, vec!["France\""]);
}

#[test]
fn test_sample_limits() {
    let mut csv = String::from("n\n");
    for i in 0..25 {
        csv.push_str(&format!("{}\n", i));
    }
    let snapshot = profile_csv(&csv).unwrap();
    assert_eq!(snapshot.columns[0].sample_values.len(), SAMPLE_VALUE_LIMIT);
    assert_eq!(snapshot.columns[0].sample_values[0], "0");
    assert_eq!(snapshot.sample_rows.len(), SAMPLE_ROW_LIMIT);
    assert_eq!(snapshot.sample_rows[4].get("n"), Some("4"));
}

#[test]
fn test_exponent_values_are_numeric() {
    let snapshot = profile_csv("x\n1e5\n2.5E-1\n").unwrap();
    assert_eq!(snapshot.columns[0].column_type(), ColumnType::Numeric);
}

#[test]
fn test_non_finite_values_are_not_numeric() {
    let snapshot = profile_csv("x\n1\ninf\n").unwrap();
    assert_eq!(snapshot.columns[0].column_type(), ColumnType::Categorical);
}

#[test]
fn test_reprofiling_replaces_everything() {
    let first = profile_csv("a,b\n1,x\n").unwrap();
    let second = profile_csv("c\nhello\n").unwrap();
    assert_ne!(first, second);
    assert!(second.column("a").is_none());
    assert_eq!(second.columns.len(), 1);
}

#[tokio::test]
async fn test_profile_file_reads_from_disk() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "id,label").unwrap();
    writeln!(file, "1,cat").unwrap();
    writeln!(file, "2,dog").unwrap();
    file.flush().unwrap();

    let snapshot = profile_file(file.path()).await.unwrap();
    assert_eq!(snapshot.row_count, 2);
    assert_eq!(snapshot.columns[1].column_type(), ColumnType::Categorical);
}

#[tokio::test]
async fn test_profile_missing_file_is_parse_error() {
    let result = profile_file("/nonexistent/dir/data.csv").await;
    assert!(matches!(result, Err(ParseError::Io(_))));
}

fn field_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,8}",
        (-1000i32..1000).prop_map(|n| n.to_string()),
        Just(String::new()),
        Just("NaN".to_string()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_row_count_and_column_order_preserved(
        header in prop::collection::vec("[a-z]{1,6}", 1..6),
        rows in prop::collection::vec(prop::collection::vec(field_strategy(), 1..6), 1..30),
    ) {
        let mut csv = header.join(",");
        csv.push('\n');
        for row in &rows {
            // Keep at least one non-blank field so no line is whitespace-only.
            let mut fields = row.clone();
            fields[0] = "r".to_string();
            csv.push_str(&fields.join(","));
            csv.push('\n');
        }

        let snapshot = profile_csv(&csv).unwrap();
        prop_assert_eq!(snapshot.row_count, rows.len());
        let names: Vec<_> = snapshot.columns.iter().map(|c| c.name.clone()).collect();
        prop_assert_eq!(names, header);

        for column in &snapshot.columns {
            prop_assert!(column.stats.missing_count <= snapshot.row_count);
            prop_assert!(column.stats.unique_count <= snapshot.row_count - column.stats.missing_count);
            prop_assert!(column.sample_values.len() <= SAMPLE_VALUE_LIMIT);
            prop_assert_eq!(column.mean().is_some(), column.column_type() == ColumnType::Numeric);
        }
    }
}
