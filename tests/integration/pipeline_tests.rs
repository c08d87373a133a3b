use results_sweeper::output::{
    load_ranked, lookup, rank_results, write_top_report, CsvResultsWriter, RecordSink,
};
use results_sweeper::record::StudentRecord;
use std::path::Path;

fn student(reg_no: &str, name: &str, branch: &str, sgpa: &str, cgpa: &str) -> StudentRecord {
    StudentRecord {
        registration_number: reg_no.to_string(),
        name: name.to_string(),
        father_name: format!("FATHER OF {}", name),
        mother_name: format!("MOTHER OF {}", name),
        college_name: "Muzaffarpur Institute of Technology, Muzaffarpur".to_string(),
        college_code: reg_no[5..8].to_string(),
        branch_name: branch.to_string(),
        branch_code: reg_no[2..5].to_string(),
        sgpa: sgpa.to_string(),
        cur_cgpa: cgpa.to_string(),
    }
}

fn write_results(path: &Path, batches: &[Vec<StudentRecord>]) {
    let mut writer = CsvResultsWriter::create(path).expect("Failed to create results");
    writer.write_header().unwrap();
    for batch in batches {
        writer.append_batch(batch).unwrap();
    }
}

#[test]
fn test_results_round_trip_through_ranking() {
    let dir = tempfile::tempdir().unwrap();
    let results = dir.path().join("results.csv");
    let ranked = dir.path().join("ranked.csv");

    let original = student("21105102003", "ASHA KUMARI", "CSE", "8.75", "8.41");
    write_results(&results, &[vec![original.clone()]]);
    rank_results(&results, &ranked).unwrap();

    let rows = load_ranked(&ranked).unwrap();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.registration_number, original.registration_number);
    assert_eq!(row.name, original.name);
    assert_eq!(row.father_name, original.father_name);
    assert_eq!(row.mother_name, original.mother_name);
    assert_eq!(row.college_name, original.college_name);
    assert_eq!(row.college_code, original.college_code);
    assert_eq!(row.branch_name, original.branch_name);
    assert_eq!(row.branch_code, original.branch_code);
    assert_eq!(row.sgpa, Some(8.75));
    assert_eq!(row.cur_cgpa, Some(8.41));
    assert_eq!(row.university_rank, Some(1));
    assert_eq!(row.branch_rank, Some(1));
}

#[test]
fn test_rank_lookup_and_report() {
    let dir = tempfile::tempdir().unwrap();
    let results = dir.path().join("results.csv");
    let ranked = dir.path().join("ranked.csv");
    let report = dir.path().join("top.md");

    write_results(
        &results,
        &[
            vec![
                student("21105102001", "A", "CSE", "9.1", "9.0"),
                student("21105102002", "B", "CSE", "8.2", "8.5"),
            ],
            vec![student("21101102001", "C", "CE", "9.3", "9.0")],
            vec![student("21101102002", "D", "CE", "7.0", "Not Found")],
        ],
    );

    let stats = rank_results(&results, &ranked).unwrap();
    assert_eq!(stats.rows_written, 4);
    assert_eq!(stats.rows_unranked, 1);

    let found = lookup(&ranked, "21105102002").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].university_rank, Some(3));
    assert_eq!(found[0].branch_rank, Some(2));

    let found = lookup(&ranked, "21101102001").unwrap();
    assert_eq!(found[0].university_rank, Some(1));
    assert_eq!(found[0].branch_rank, Some(1));

    assert!(lookup(&ranked, "99999999999").unwrap().is_empty());

    let rows = load_ranked(&ranked).unwrap();
    write_top_report(&rows, 2, &report).unwrap();
    let md = std::fs::read_to_string(&report).unwrap();
    assert!(md.starts_with("# Top 2 Students by CGPA"));
    assert!(md.contains("| 1 | A |"));
    assert!(md.contains("| 2 | C |"));
    assert!(!md.contains("| B |"));
}
