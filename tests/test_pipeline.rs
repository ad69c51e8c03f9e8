//! Integration tests for the full exploration pipeline

use polars::prelude::*;
use sigmascope::pipeline::{
    analyze_missing_values, clean, detect_outliers_per_column, load_dataset,
    load_dataset_with_progress, numeric_columns, unique_values, DEFAULT_SIGMA_MULTIPLIER,
};
use sigmascope::report::CleaningSummary;

mod common;

use common::*;

#[test]
fn test_full_pipeline_from_csv() {
    let mut df = create_happiness_dataframe();
    let (temp_dir, csv_path) = create_temp_csv(&mut df);

    let (df, rows, _cols, _mem) = load_dataset_with_progress(&csv_path, 100).unwrap();
    assert_eq!(rows, 12);

    let missing = analyze_missing_values(&df).unwrap();
    assert_eq!(missing.len(), 1);

    let columns = numeric_columns(&df, &["Overall rank"]);
    assert_eq!(columns, happiness_check_columns());

    let outcomes = detect_outliers_per_column(&df, &columns);
    assert!(outcomes.iter().all(|o| o.result.is_ok()));
    let flagged: Vec<&str> = outcomes
        .iter()
        .filter(|o| !o.result.as_ref().unwrap().is_empty())
        .map(|o| o.column.as_str())
        .collect();
    assert_eq!(flagged, vec!["Score", "Healthy life expectancy"]);

    let cleaned = clean(&df, &columns).unwrap();
    assert_eq!((cleaned.original_rows, cleaned.final_rows), (12, 11));

    let mut summary = CleaningSummary::new(DEFAULT_SIGMA_MULTIPLIER, rows);
    summary.add_checks(&outcomes);
    summary.set_cleaned(&cleaned);
    assert_eq!(summary.rows_removed(), 1);

    // Cleaned data survives a write/read cycle
    let out_path = temp_dir.path().join("cleaned.parquet");
    let mut cleaned_df = cleaned.data.clone();
    let file = std::fs::File::create(&out_path).unwrap();
    ParquetWriter::new(file).finish(&mut cleaned_df).unwrap();

    let reloaded = load_dataset(&out_path, 100).unwrap();
    assert_shape(&reloaded, 11, 9);
    let countries = unique_values(&reloaded, "Country or region").unwrap();
    assert!(!countries.contains(&"Burundi".to_string()));
}

#[test]
fn test_independent_callers_in_parallel() {
    use rayon::prelude::*;

    let frames: Vec<DataFrame> = (0..8).map(|s| create_random_dataframe(500, 2, s)).collect();
    let sequential: Vec<usize> = frames
        .iter()
        .map(|df| clean(df, &["c0", "c1"]).unwrap().final_rows)
        .collect();
    let parallel: Vec<usize> = frames
        .par_iter()
        .map(|df| clean(df, &["c0", "c1"]).unwrap().final_rows)
        .collect();

    assert_eq!(sequential, parallel);
}
