use super::*;

fn catalogue(names: &[&str]) -> Table {
    let mut t = Table::new(vec!["Product Name".to_string(), "Price".to_string()]);
    for (i, n) in names.iter().enumerate() {
        t.push_row(vec![n.to_string(), format!("{}.99", i + 1)]);
    }
    t
}

fn metrics_table(name: &str, c: f64, p: f64, m: f64) -> Table {
    let mut t = Table::new(vec![
        "Product Name".to_string(),
        "Correctness".to_string(),
        "Compliance".to_string(),
        "Completeness".to_string(),
    ]);
    t.push_row(vec![
        name.to_string(),
        c.to_string(),
        p.to_string(),
        m.to_string(),
    ]);
    t
}

fn echo_scorer(row: &Table) -> Result<Table, ScoreError> {
    let name = row.cell(0, "Product Name").unwrap_or_default();
    Ok(metrics_table(name, 10.0, 9.0, 8.0))
}

#[test]
fn test_all_rows_succeed_in_input_order() {
    let table = catalogue(&["a", "b", "c", "d"]);
    let mut scorer = echo_scorer;
    let out = run_stage2(&table, &mut scorer);

    assert_eq!(out.n_input_rows, 4);
    assert_eq!(out.results.n_rows(), 4);
    assert_eq!(out.metrics.len(), 4);
    assert_eq!(out.timings.len(), 4);
    assert!(out.failures.is_empty());
    let names: Vec<_> = (0..4)
        .map(|r| out.results.cell(r, "Product Name").unwrap())
        .collect();
    assert_eq!(names, vec!["a", "b", "c", "d"]);
    let sources: Vec<_> = out.timings.iter().map(|t| t.source_row).collect();
    assert_eq!(sources, vec![0, 1, 2, 3]);
    assert!(out.timings.iter().all(|t| t.seconds >= 0.0));
}

#[test]
fn test_failed_row_is_skipped_and_alignment_kept() {
    let table = catalogue(&["a", "b", "c"]);
    let mut scorer = |row: &Table| -> Result<Table, ScoreError> {
        match row.cell(0, "Product Name") {
            Some("b") => Err(ScoreError::Other("model exploded".to_string())),
            Some(name) => Ok(metrics_table(name, 1.0, 2.0, 3.0)),
            None => Err(ScoreError::Other("no name".to_string())),
        }
    };
    let out = run_stage2(&table, &mut scorer);

    assert_eq!(out.results.n_rows(), 2);
    assert_eq!(out.timings.len(), 2);
    assert_eq!(out.metrics.len(), out.results.n_rows());
    assert_eq!(out.results.cell(0, "Product Name"), Some("a"));
    assert_eq!(out.results.cell(1, "Product Name"), Some("c"));
    assert_eq!(out.timings[1].source_row, 2);
    assert_eq!(
        out.failures,
        vec![RowFailure {
            row: 1,
            message: "model exploded".to_string(),
        }]
    );
}

#[test]
fn test_scorer_sees_single_row_with_all_columns() {
    let table = catalogue(&["a", "b"]);
    let mut seen = Vec::new();
    let mut scorer = |row: &Table| -> Result<Table, ScoreError> {
        seen.push(row.clone());
        Ok(metrics_table("x", 10.0, 10.0, 10.0))
    };
    run_stage2(&table, &mut scorer);

    assert_eq!(seen.len(), 2);
    assert_eq!(seen[1], table.row_table(1));
}

#[test]
fn test_response_without_metric_columns_counts_as_failure() {
    let table = catalogue(&["a"]);
    let mut scorer = |_: &Table| -> Result<Table, ScoreError> {
        let mut t = Table::new(vec!["Correctness".to_string()]);
        t.push_row(vec!["9".to_string()]);
        Ok(t)
    };
    let out = run_stage2(&table, &mut scorer);

    assert!(out.results.is_empty());
    assert!(out.timings.is_empty());
    assert_eq!(out.failures.len(), 1);
    assert!(out.failures[0].message.contains("Compliance"));
}

#[test]
fn test_empty_response_counts_as_failure() {
    let table = catalogue(&["a"]);
    let mut scorer = |_: &Table| -> Result<Table, ScoreError> {
        Ok(Table::new(vec!["Correctness".to_string()]))
    };
    let out = run_stage2(&table, &mut scorer);
    assert_eq!(out.failures.len(), 1);
    assert!(out.timings.is_empty());
}

#[test]
fn test_multi_row_response_keeps_source_attribution() {
    let table = catalogue(&["a", "b"]);
    let mut scorer = |row: &Table| -> Result<Table, ScoreError> {
        let name = row.cell(0, "Product Name").unwrap_or_default().to_string();
        let mut t = metrics_table(&name, 10.0, 10.0, 10.0);
        if name == "a" {
            t.push_row(vec![name.clone(), "5".into(), "5".into(), "5".into()]);
        }
        Ok(t)
    };
    let out = run_stage2(&table, &mut scorer);

    assert_eq!(out.results.n_rows(), 3);
    assert_eq!(out.metrics.len(), 3);
    assert_eq!(out.timings.len(), 2);
    assert_eq!(out.timings[1].source_row, 1);
}

#[test]
fn test_empty_catalogue_scores_nothing() {
    let mut scorer = echo_scorer;
    let out = run_stage2(&catalogue(&[]), &mut scorer);
    assert_eq!(out.n_input_rows, 0);
    assert!(out.results.columns.is_empty());
    assert!(out.processing_seconds().is_empty());
}
