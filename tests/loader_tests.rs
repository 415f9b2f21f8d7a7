use devscore::reference::loader::{from_csv_reader, load_csv, load_json, load_reference, save_json};
use devscore::reference::{MetricStats, ReferenceModel};
use devscore::scorer::MetricKey;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_loader_parses_valid_rows() {
    let data = "metric,mean,median,std_dev,p25,p75\n\
                log_stars,1.0,0.5,1.0,0.2,1.2\n\
                merge_rate,0.7,0.75,0.2,0.6,0.9\n";
    let model = from_csv_reader(data.as_bytes(), "test").unwrap();

    assert_eq!(model.version, "test");
    assert_eq!(model.len(), 2);
    assert_eq!(
        model.get(MetricKey::LogStars),
        MetricStats::new(1.0, 0.5, 1.0, 0.2, 1.2)
    );
    // Not in the file: conservative baseline
    assert_eq!(model.get(MetricKey::Watchers), MetricStats::CONSERVATIVE);
}

#[test]
fn test_loader_skips_garbage_rows() {
    let data = "metric,mean,median,std_dev,p25,p75\n\
                gists,8.5,3,24,1,10\n\
                watchers,abc,4,95,1,12\n\
                issues,24,8,68\n\
                reviews,18,6,-52,2,22\n\
                organizations,2.8,2,4.2,5,1\n\
                 pull_requests , 28 , 12 , 78 , 3 , 35 \n";
    let model = from_csv_reader(data.as_bytes(), "dirty").unwrap();

    assert_eq!(model.len(), 2);
    assert!(model.contains(MetricKey::Gists));
    assert!(model.contains(MetricKey::PullRequests));
    assert!(!model.contains(MetricKey::Watchers));
    assert!(!model.contains(MetricKey::Reviews));
    assert!(!model.contains(MetricKey::Organizations));
}

#[test]
fn test_loader_keeps_unknown_metrics_by_name() {
    let data = "metric,mean,median,std_dev,p25,p75\n\
                gists,8.5,3,24,1,10\n\
                lines_of_code,5000,2000,9000,500,8000\n";
    let model = from_csv_reader(data.as_bytes(), "extra").unwrap();
    assert_eq!(model.get_by_name("lines_of_code").median, 2000.0);
    assert_eq!(model.extra_names().count(), 1);
}

#[test]
fn test_loader_rejects_empty_table() {
    let data = "metric,mean,median,std_dev,p25,p75\n";
    assert!(from_csv_reader(data.as_bytes(), "empty").is_err());
}

#[test]
fn test_csv_file_version_from_stem() {
    let mut file = tempfile::Builder::new()
        .prefix("cohort-2025")
        .suffix(".csv")
        .tempfile()
        .unwrap();
    writeln!(file, "metric,mean,median,std_dev,p25,p75").unwrap();
    writeln!(file, "log_followers,1.05,0.60,0.88,0.30,1.45").unwrap();

    let model = load_csv(file.path()).unwrap();
    assert!(model.version.starts_with("cohort-2025"));
    assert_eq!(model.get(MetricKey::LogFollowers).p75, 1.45);
}

#[test]
fn test_json_round_trip_through_disk() {
    let builtin = ReferenceModel::builtin();
    let file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    save_json(&builtin, file.path()).unwrap();

    let loaded = load_reference(file.path()).unwrap();
    assert_eq!(loaded, builtin);
}

#[test]
fn test_json_rejects_invalid_stats() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"version": "bad", "metrics": {{"gists": {{"mean": 1, "median": 1, "std_dev": -1, "p25": 0, "p75": 2}}}}}}"#
    )
    .unwrap();
    assert!(load_json(file.path()).is_err());
}

#[test]
fn test_missing_file_is_io_error() {
    let err = load_csv("/definitely/not/here.csv").unwrap_err();
    assert!(matches!(err, devscore::DevScoreError::Io(_)));
}

#[test]
fn test_bundled_table_matches_builtin() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/reference/population-2024.1.csv");
    let model = load_csv(path).unwrap();
    let builtin = ReferenceModel::builtin();

    assert_eq!(model.version, builtin.version);
    for (name, stats) in builtin.rows() {
        assert_eq!(model.get_by_name(&name), stats, "{}", name);
    }
}
