use results_sweeper::config::Config;
use results_sweeper::output::{CsvResultsWriter, RecordSink};
use results_sweeper::record::{StudentRecord, NOT_FOUND};
use results_sweeper::sweep::{run_sweep, Coordinator};
use std::collections::BTreeMap;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A result page in the portal's markup
fn result_page(name: &str, college: &str, course: &str, sgpa: &str, cgpa: &str) -> String {
    format!(
        r#"<html><body><form>
        <table>
          <tr><td>Name</td><td><span id="ContentPlaceHolder1_DataList1_StudentNameLabel_0">{name}</span></td></tr>
          <tr><td>Father</td><td><span id="ContentPlaceHolder1_DataList1_FatherNameLabel_0">FATHER OF {name}</span></td></tr>
          <tr><td>Mother</td><td><span id="ContentPlaceHolder1_DataList1_MotherNameLabel_0">MOTHER OF {name}</span></td></tr>
          <tr><td>College</td><td><span id="ContentPlaceHolder1_DataList1_CollegeNameLabel_0">{college}</span></td></tr>
          <tr><td>Course</td><td><span id="ContentPlaceHolder1_DataList1_CourseLabel_0">{course}</span></td></tr>
        </table>
        <span id="ContentPlaceHolder1_DataList5_GROSSTHEORYTOTALLabel_0">{sgpa}</span>
        <table id="ContentPlaceHolder1_GridView3">
          <tr><th>I</th><th>II</th><th>III</th><th>IV</th><th>V</th><th>VI</th><th>Cur. CGPA</th></tr>
          <tr><td>7.5</td><td>7.8</td><td>8.0</td><td>8.1</td><td>8.4</td><td>{sgpa}</td><td>{cgpa}</td></tr>
        </table>
        </form></body></html>"#
    )
}

/// Creates a configuration pointing at the mock portal
fn create_test_config(server: &MockServer, results_path: &str) -> Config {
    let mut config = Config::default();
    config.sweep.branches = BTreeMap::from([(
        "105".to_string(),
        "Computer Science Engineering (CSE)".to_string(),
    )]);
    config.sweep.college_start = 102;
    config.sweep.college_end = 102;
    config.sweep.stagger_ms = 1;
    config.http.url_template = format!("{}/Results.aspx?Sem=VI&RegNo={{reg_no}}", server.uri());
    config.http.timeout_secs = 2;
    config.output.results_path = results_path.to_string();
    config
}

fn read_results(path: &std::path::Path) -> Vec<StudentRecord> {
    let mut reader = csv::Reader::from_path(path).expect("Failed to open results");
    reader
        .deserialize()
        .map(|r| r.expect("Failed to parse row"))
        .collect()
}

#[tokio::test]
async fn test_single_student_prefix() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/Results.aspx"))
        .and(query_param("RegNo", "21105102003"))
        .respond_with(ResponseTemplate::new(200).set_body_string(result_page(
            "ASHA KUMARI",
            "Government Engineering College, Nalanda",
            "Computer Science & Engineering",
            "8.75",
            "8.41",
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    // 001, 002 before the student and 004..=008 after
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(7)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let results_path = dir.path().join("results.csv");
    let config = create_test_config(&mock_server, results_path.to_str().unwrap());

    let summary = run_sweep(config).await.expect("Sweep failed");
    assert_eq!(summary.prefixes_scheduled, 1);
    assert_eq!(summary.sweeps_completed, 1);
    assert_eq!(summary.sweeps_stopped_early, 1);
    assert_eq!(summary.fetch_attempts, 8);
    assert_eq!(summary.records_written, 1);

    let records = read_results(&results_path);
    assert_eq!(
        records,
        vec![StudentRecord {
            registration_number: "21105102003".to_string(),
            name: "ASHA KUMARI".to_string(),
            father_name: "FATHER OF ASHA KUMARI".to_string(),
            mother_name: "MOTHER OF ASHA KUMARI".to_string(),
            college_name: "Government Engineering College, Nalanda".to_string(),
            college_code: "102".to_string(),
            branch_name: "Computer Science & Engineering".to_string(),
            branch_code: "105".to_string(),
            sgpa: "8.75".to_string(),
            cur_cgpa: "8.41".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_error_pages_and_failures_are_absent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("RegNo", "21105102001"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body>Invalid Registration No</body></html>"),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("RegNo", "21105102002"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("RegNo", "21105102003"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<span id="ContentPlaceHolder1_DataList1_StudentNameLabel_0">PARTIAL</span>"#,
        ))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let results_path = dir.path().join("results.csv");
    let config = create_test_config(&mock_server, results_path.to_str().unwrap());

    let summary = run_sweep(config).await.expect("Sweep failed");
    assert_eq!(summary.records_written, 1);

    let records = read_results(&results_path);
    assert_eq!(records.len(), 1);
    let partial = &records[0];
    assert_eq!(partial.name, "PARTIAL");
    assert_eq!(partial.father_name, NOT_FOUND);
    assert_eq!(partial.college_name, NOT_FOUND);
    assert_eq!(partial.sgpa, NOT_FOUND);
    assert_eq!(partial.cur_cgpa, NOT_FOUND);
    assert_eq!(partial.college_code, "102");
    assert_eq!(partial.branch_code, "105");
}

#[tokio::test]
async fn test_rerun_overwrites_results() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let results_path = dir.path().join("results.csv");
    std::fs::write(&results_path, "old header\nold row\n").unwrap();

    let config = create_test_config(&mock_server, results_path.to_str().unwrap());
    run_sweep(config).await.expect("Sweep failed");

    let content = std::fs::read_to_string(&results_path).unwrap();
    assert_eq!(content.lines().count(), 1);
    assert!(content.starts_with("Registration Number,Name,"));
}

#[tokio::test]
async fn test_many_prefixes_write_whole_batches() {
    let mock_server = MockServer::start().await;

    // Every prefix has students 001..=003
    for college in 102..=109 {
        for seq in 1..=3 {
            let reg_no = format!("21105{:03}{:03}", college, seq);
            Mock::given(method("GET"))
                .and(query_param("RegNo", reg_no.as_str()))
                .respond_with(ResponseTemplate::new(200).set_body_string(result_page(
                    &reg_no, "C", "CSE", "8.0", "8.0",
                )))
                .mount(&mock_server)
                .await;
        }
    }
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let results_path = dir.path().join("results.csv");
    let mut config = create_test_config(&mock_server, results_path.to_str().unwrap());
    config.sweep.college_end = 109;
    config.sweep.max_concurrent_sweeps = 4;

    let mut writer = CsvResultsWriter::create(&results_path).unwrap();
    let summary = Coordinator::new(config)
        .unwrap()
        .run(&mut writer)
        .await
        .expect("Sweep failed");
    assert_eq!(summary.records_written, 24);

    let records = read_results(&results_path);
    assert_eq!(records.len(), 24);

    // Rows of one prefix are contiguous and in sequence order
    for chunk in records.chunks(3) {
        let prefix = &chunk[0].registration_number[..8];
        let seqs: Vec<&str> = chunk
            .iter()
            .map(|r| {
                assert_eq!(&r.registration_number[..8], prefix);
                &r.registration_number[8..]
            })
            .collect();
        assert_eq!(seqs, ["001", "002", "003"]);
    }
}

#[test]
fn test_header_only_writer() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.csv");
    let mut writer = CsvResultsWriter::create(&path).unwrap();
    writer.write_header().unwrap();
    assert!(read_results(&path).is_empty());
}
