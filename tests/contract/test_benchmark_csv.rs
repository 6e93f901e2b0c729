//! Contract test for the benchmark ownership CSV

use perfgen::services::ownership;

#[test]
fn test_csv_header_and_ordering() {
    let csv = ownership::benchmark_csv().unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines[0], "AUTOGENERATED FILE DO NOT EDIT");
    assert_eq!(lines[1], "Run perfgen to make changes");
    assert_eq!(lines[2], "Benchmark name,Individual owners,Component");

    // Data rows come out sorted by benchmark name
    let names: Vec<&str> = lines[3..]
        .iter()
        .map(|line| line.split(',').next().unwrap())
        .collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
}

#[test]
fn test_csv_covers_waterfall_and_standalone_benchmarks() {
    let csv = ownership::benchmark_csv().unwrap();
    // Telemetry, non-telemetry, and non-waterfall benchmarks all appear
    assert!(csv.lines().any(|l| l.starts_with("speedometer,")));
    assert!(csv.lines().any(|l| l.starts_with("angle_perftests,")));
    assert!(csv.lines().any(|l| l.starts_with("resource_sizes,")));
}

#[test]
fn test_multi_owner_fields_are_quoted() {
    let csv = ownership::benchmark_csv().unwrap();
    // Owner lists with several emails contain commas, so the field must be
    // quoted for the document to stay valid CSV
    let multi_owner = csv
        .lines()
        .find(|l| l.contains("\""))
        .expect("no quoted owner field found");
    let quoted = multi_owner.split('"').nth(1).unwrap();
    assert!(quoted.contains(','));
}

#[test]
fn test_every_row_names_an_owner() {
    let csv = ownership::benchmark_csv().unwrap();
    for line in csv.lines().skip(3) {
        let owners = if line.contains('"') {
            line.split('"').nth(1).unwrap().to_string()
        } else {
            line.split(',').nth(1).unwrap().to_string()
        };
        assert!(!owners.is_empty(), "row without owner: {line}");
    }
}

#[test]
fn test_ends_with_single_trailing_newline() {
    let csv = ownership::benchmark_csv().unwrap();
    assert!(csv.ends_with('\n'));
    assert!(!csv.ends_with("\n\n"));
}
