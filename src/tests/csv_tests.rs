//! tests/csv_tests.rs
//! Pruebas unitarias para `CsvManager`.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::fs;

    use serde_json::json;
    use tempfile::TempDir;

    use crate::models::csv_model::{Category, CsvTable, FilterCondition};
    use crate::models::record_model::AutomationLogEntry;
    use crate::services::csv_service::{
        concat_tables, dedupe_headers, parse_csv, validate_filename, CsvManager,
    };

    fn setup() -> (TempDir, CsvManager) {
        let tmp = TempDir::new().expect("No se pudo crear tempdir");
        let manager = CsvManager::new(tmp.path()).expect("No se pudo crear CsvManager");
        (tmp, manager)
    }

    fn table(headers: &[&str], rows: &[&[&str]]) -> CsvTable {
        CsvTable::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    fn clients_table() -> CsvTable {
        table(
            &["client_id", "name", "monthly_amount", "status"],
            &[
                &["C001", "ABC Office Complex", "3500", "active"],
                &["C002", "Downtown Restaurant", "2200", "active"],
                &["C003", "Medical Center", "4800", "active"],
                &["C004", "Retail Store", "6200", "renewal"],
            ],
        )
    }

    #[test]
    fn creates_category_directories() {
        let (tmp, _manager) = setup();
        for category in Category::ALL {
            assert!(tmp.path().join(category.as_str()).is_dir(), "Falta {}", category);
        }
    }

    #[test]
    fn save_then_load_keeps_rows_and_columns() {
        let (_tmp, manager) = setup();
        let original = clients_table();

        manager
            .save_csv(&original, "clients.csv", Category::Clients)
            .unwrap();
        let loaded = manager
            .load_csv("clients.csv", Category::Clients)
            .unwrap()
            .expect("El archivo debería existir");

        assert_eq!(loaded.row_count(), original.row_count());
        assert_eq!(loaded.headers, original.headers);
        assert_eq!(loaded, original);
    }

    #[test]
    fn load_missing_file_returns_none() {
        let (_tmp, manager) = setup();
        let res = manager.load_csv("nope.csv", Category::Reports).unwrap();
        assert!(res.is_none());
    }

    #[test]
    fn delete_missing_file_returns_false() {
        let (_tmp, manager) = setup();
        let deleted = manager.delete_csv("ghost.csv", Category::Clients).unwrap();
        assert!(!deleted);
    }

    #[test]
    fn delete_existing_file_removes_it() {
        let (_tmp, manager) = setup();
        manager
            .save_csv(&clients_table(), "clients.csv", Category::Clients)
            .unwrap();

        assert!(manager.delete_csv("clients.csv", Category::Clients).unwrap());
        assert!(!manager.exists("clients.csv", Category::Clients));
        assert!(!manager.delete_csv("clients.csv", Category::Clients).unwrap());
    }

    #[test]
    fn list_only_returns_csv_files_sorted() {
        let (tmp, manager) = setup();
        manager
            .save_csv(&clients_table(), "b.csv", Category::Reports)
            .unwrap();
        manager
            .save_csv(&clients_table(), "a.csv", Category::Reports)
            .unwrap();
        fs::write(tmp.path().join("reports").join("notes.txt"), "hola").unwrap();

        let files = manager.list_csv_files(Category::Reports).unwrap();
        assert_eq!(files, vec!["a.csv".to_string(), "b.csv".to_string()]);
        assert!(manager.list_csv_files(Category::Workflows).unwrap().is_empty());
    }

    #[test]
    fn merge_with_disjoint_columns_produces_union() {
        let (_tmp, manager) = setup();
        let left = table(&["a", "b"], &[&["1", "2"], &["3", "4"]]);
        let right = table(&["c"], &[&["x"], &["y"], &["z"]]);
        manager.save_csv(&left, "left.csv", Category::Reports).unwrap();
        manager.save_csv(&right, "right.csv", Category::Reports).unwrap();

        let merged_ok = manager
            .merge_csv_files(
                &["left.csv".to_string(), "right.csv".to_string()],
                "merged.csv",
                Category::Reports,
            )
            .unwrap();
        assert!(merged_ok);

        let merged = manager
            .load_csv("merged.csv", Category::Reports)
            .unwrap()
            .unwrap();
        assert_eq!(merged.headers, vec!["a", "b", "c"]);
        assert_eq!(merged.row_count(), 5);
        assert_eq!(merged.rows[0], vec!["1", "2", ""]);
        assert_eq!(merged.rows[4], vec!["", "", "z"]);
    }

    #[test]
    fn merge_skips_missing_inputs() {
        let (_tmp, manager) = setup();
        manager
            .save_csv(&clients_table(), "clients.csv", Category::Clients)
            .unwrap();

        let ok = manager
            .merge_csv_files(
                &["clients.csv".to_string(), "missing.csv".to_string()],
                "all.csv",
                Category::Clients,
            )
            .unwrap();
        assert!(ok);
        let merged = manager.load_csv("all.csv", Category::Clients).unwrap().unwrap();
        assert_eq!(merged.row_count(), 4);
    }

    #[test]
    fn merge_without_loadable_inputs_returns_false() {
        let (_tmp, manager) = setup();
        let ok = manager
            .merge_csv_files(&["missing.csv".to_string()], "out.csv", Category::Clients)
            .unwrap();
        assert!(!ok);
        assert!(!manager.exists("out.csv", Category::Clients));
    }

    #[test]
    fn concat_keeps_first_appearance_order() {
        let merged = concat_tables(&[
            table(&["b", "a"], &[&["1", "2"]]),
            table(&["a", "c"], &[&["3", "4"]]),
        ]);
        assert_eq!(merged.headers, vec!["b", "a", "c"]);
        assert_eq!(merged.rows[1], vec!["", "3", "4"]);
    }

    #[test]
    fn filter_by_numeric_range() {
        let (_tmp, manager) = setup();
        manager
            .save_csv(&clients_table(), "clients.csv", Category::Clients)
            .unwrap();

        let mut filters = HashMap::new();
        filters.insert(
            "monthly_amount".to_string(),
            FilterCondition {
                min: Some(3000.0),
                max: Some(5000.0),
                ..Default::default()
            },
        );

        let filtered = manager
            .filter_csv_data("clients.csv", &filters, Category::Clients)
            .unwrap()
            .unwrap();
        let ids: Vec<&str> = filtered.rows.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(ids, vec!["C001", "C003"]);
    }

    #[test]
    fn filter_contains_and_equals() {
        let (_tmp, manager) = setup();
        manager
            .save_csv(&clients_table(), "clients.csv", Category::Clients)
            .unwrap();

        let mut filters = HashMap::new();
        filters.insert(
            "name".to_string(),
            FilterCondition {
                contains: Some("Center".to_string()),
                ..Default::default()
            },
        );
        let filtered = manager
            .filter_csv_data("clients.csv", &filters, Category::Clients)
            .unwrap()
            .unwrap();
        assert_eq!(filtered.row_count(), 1);
        assert_eq!(filtered.rows[0][0], "C003");

        let mut filters = HashMap::new();
        filters.insert(
            "status".to_string(),
            FilterCondition {
                equals: Some(json!("renewal")),
                ..Default::default()
            },
        );
        filters.insert(
            "monthly_amount".to_string(),
            FilterCondition {
                equals: Some(json!(6200)),
                ..Default::default()
            },
        );
        let filtered = manager
            .filter_csv_data("clients.csv", &filters, Category::Clients)
            .unwrap()
            .unwrap();
        assert_eq!(filtered.row_count(), 1);
        assert_eq!(filtered.rows[0][0], "C004");
    }

    #[test]
    fn filter_ignores_unknown_columns() {
        let (_tmp, manager) = setup();
        manager
            .save_csv(&clients_table(), "clients.csv", Category::Clients)
            .unwrap();

        let mut filters = HashMap::new();
        filters.insert(
            "does_not_exist".to_string(),
            FilterCondition {
                min: Some(1.0),
                ..Default::default()
            },
        );
        let filtered = manager
            .filter_csv_data("clients.csv", &filters, Category::Clients)
            .unwrap()
            .unwrap();
        assert_eq!(filtered.row_count(), 4);

        let missing = manager
            .filter_csv_data("other.csv", &filters, Category::Clients)
            .unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn numeric_filter_drops_non_numeric_cells() {
        let (_tmp, manager) = setup();
        let t = table(&["v"], &[&["10"], &["n/a"], &[""], &["20"]]);
        manager.save_csv(&t, "vals.csv", Category::Reports).unwrap();

        let mut filters = HashMap::new();
        filters.insert(
            "v".to_string(),
            FilterCondition {
                min: Some(0.0),
                ..Default::default()
            },
        );
        let filtered = manager
            .filter_csv_data("vals.csv", &filters, Category::Reports)
            .unwrap()
            .unwrap();
        assert_eq!(filtered.row_count(), 2);
    }

    #[test]
    fn rejects_unsafe_filenames() {
        assert!(validate_filename("clients.csv").is_ok());
        assert!(validate_filename("../etc/passwd.csv").is_err());
        assert!(validate_filename("a/b.csv").is_err());
        assert!(validate_filename("report.txt").is_err());
        assert!(validate_filename("").is_err());
        assert!(validate_filename(".hidden.csv").is_err());

        let (_tmp, manager) = setup();
        assert!(manager
            .save_csv(&clients_table(), "../escape.csv", Category::Clients)
            .is_err());
    }

    #[test]
    fn parse_pads_short_rows_and_rejects_empty_input() {
        let parsed = parse_csv("a,b,c\n1,2\n".as_bytes()).unwrap();
        assert_eq!(parsed.rows[0], vec!["1", "2", ""]);
        assert!(parse_csv("".as_bytes()).is_err());
    }

    #[test]
    fn file_stats_reports_shape() {
        let (_tmp, manager) = setup();
        manager
            .save_csv(&clients_table(), "clients.csv", Category::Clients)
            .unwrap();

        let stats = manager
            .file_stats("clients.csv", Category::Clients)
            .unwrap()
            .unwrap();
        assert_eq!(stats.rows, 4);
        assert_eq!(stats.columns, 4);
        assert!(stats.size_kb >= 0.0);
        assert!(manager
            .file_stats("missing.csv", Category::Clients)
            .unwrap()
            .is_none());
    }

    #[test]
    fn append_record_writes_header_once() {
        let (tmp, manager) = setup();
        let entry = |id: u64| AutomationLogEntry {
            log_id: id,
            workflow_name: "Invoice Generator".to_string(),
            execution_time: "2024-12-02 10:00:00".to_string(),
            status: "success".to_string(),
            records_processed: 3,
            execution_duration: 1.5,
        };

        manager
            .append_record(&entry(1), "log.csv", Category::Automations)
            .unwrap();
        manager
            .append_record(&entry(2), "log.csv", Category::Automations)
            .unwrap();

        let raw = fs::read_to_string(tmp.path().join("automations").join("log.csv")).unwrap();
        assert_eq!(raw.matches("workflow_name").count(), 1);

        let records: Vec<AutomationLogEntry> = manager
            .load_records("log.csv", Category::Automations)
            .unwrap()
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].log_id, 2);
    }

    #[test]
    fn merge_rejects_invalid_input_names() {
        let (_tmp, manager) = setup();
        manager
            .save_csv(&clients_table(), "clients.csv", Category::Clients)
            .unwrap();

        let res = manager.merge_csv_files(
            &["clients.csv".to_string(), "notes.txt".to_string()],
            "x.csv",
            Category::Clients,
        );
        assert!(res.is_err());
        assert!(!manager.exists("x.csv", Category::Clients));
    }

    #[test]
    fn duplicate_headers_survive_load_and_merge() {
        let (tmp, manager) = setup();
        fs::write(tmp.path().join("reports").join("dup.csv"), "a,a\n1,2\n").unwrap();

        let loaded = manager.load_csv("dup.csv", Category::Reports).unwrap().unwrap();
        assert_eq!(loaded.headers, vec!["a", "a.1"]);

        let ok = manager
            .merge_csv_files(&["dup.csv".to_string()], "out.csv", Category::Reports)
            .unwrap();
        assert!(ok);
        let merged = manager.load_csv("out.csv", Category::Reports).unwrap().unwrap();
        assert_eq!(merged.headers, vec!["a", "a.1"]);
        assert_eq!(merged.rows, vec![vec!["1", "2"]]);
    }

    #[test]
    fn dedupe_skips_names_already_taken() {
        let headers = vec!["a", "a.1", "a", "b", "a"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(dedupe_headers(headers), vec!["a", "a.1", "a.2", "b", "a.3"]);
    }

    #[test]
    fn rows_wider_than_header_are_rejected() {
        let err = parse_csv("a,b\n1,2,3,4\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Expected 2 fields"), "{}", err);

        let (tmp, manager) = setup();
        let wide = table(&["a"], &[&["1", "lost"]]);
        assert!(manager.save_csv(&wide, "wide.csv", Category::Reports).is_err());
        assert!(!tmp.path().join("reports").join("wide.csv").exists());

        fs::write(tmp.path().join("reports").join("bad.csv"), "a,b\n1,2,3\n").unwrap();
        assert!(manager.load_csv("bad.csv", Category::Reports).is_err());
    }

    #[test]
    fn filter_equals_bool_and_null() {
        let (_tmp, manager) = setup();
        let t = table(
            &["id", "active"],
            &[&["1", "true"], &["2", "FALSE"], &["3", ""], &["4", "True"]],
        );
        manager.save_csv(&t, "flags.csv", Category::Reports).unwrap();

        let run = |expected: serde_json::Value| {
            let mut filters = HashMap::new();
            filters.insert(
                "active".to_string(),
                FilterCondition {
                    equals: Some(expected),
                    ..Default::default()
                },
            );
            manager
                .filter_csv_data("flags.csv", &filters, Category::Reports)
                .unwrap()
                .unwrap()
                .rows
                .into_iter()
                .map(|r| r[0].clone())
                .collect::<Vec<String>>()
        };

        assert_eq!(run(json!(true)), vec!["1", "4"]);
        assert_eq!(run(json!(false)), vec!["2"]);
        assert_eq!(run(json!(null)), vec!["3"]);
    }
}
