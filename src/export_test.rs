use serde_json::{Value, json};
use time::Month;

use super::*;
use crate::element::ElementType;
use crate::factory::create_element;

fn date() -> Date {
    Date::from_calendar_date(2024, Month::May, 1).unwrap()
}

fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!("formbuilder-export-{}", uuid::Uuid::new_v4()))
}

// =============================================================
// File name
// =============================================================

#[test]
fn file_name_uses_iso_date() {
    assert_eq!(submission_file_name(date()), "form-submission-2024-05-01.json");
}

#[test]
fn file_name_pads_month_and_day() {
    let date = Date::from_calendar_date(2025, Month::January, 9).unwrap();
    assert_eq!(submission_file_name(date), "form-submission-2025-01-09.json");
}

// =============================================================
// Rendering
// =============================================================

#[test]
fn render_two_elements_one_response() {
    let elements = vec![create_element(ElementType::TextInput), create_element(ElementType::Columns2)];
    let mut responses = ResponseStore::new();
    responses.set(elements[0].id.clone(), json!("Ada"));

    let doc = render_submission(&elements, &responses, date()).unwrap();
    let value: Value = serde_json::from_str(&doc.contents).unwrap();

    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 2);
    assert_eq!(value["elements"].as_array().unwrap().len(), 2);
    assert_eq!(value["responses"].as_object().unwrap().len(), 1);
    assert_eq!(value["responses"][&elements[0].id], "Ada");
    assert_eq!(value["elements"][1]["columns"], json!([]));
}

#[test]
fn render_is_pretty_printed() {
    let doc = render_submission(&[], &ResponseStore::new(), date()).unwrap();
    assert_eq!(doc.contents, "{\n  \"elements\": [],\n  \"responses\": {}\n}");
}

#[test]
fn rendered_document_parses_back() {
    let elements = vec![create_element(ElementType::MultipleChoice)];
    let mut responses = ResponseStore::new();
    responses.set("stale-id", json!(["option_1"]));

    let doc = render_submission(&elements, &responses, date()).unwrap();
    let submission = parse_submission(&doc.contents).unwrap();
    assert_eq!(submission.elements, elements);
    assert_eq!(submission.responses, responses);
}

#[test]
fn parse_rejects_non_submission() {
    assert!(parse_submission("[1, 2, 3]").is_err());
}

// =============================================================
// Directory downloader
// =============================================================

#[test]
fn directory_downloader_writes_file() {
    let dir = scratch_dir();
    let downloader = DirectoryDownloader::new(&dir);
    let doc = ExportDocument { file_name: "form-submission-2024-05-01.json".to_owned(), contents: "{}".to_owned() };

    downloader.download(&doc).unwrap();

    let written = std::fs::read_to_string(dir.join(&doc.file_name)).unwrap();
    assert_eq!(written, "{}");
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn directory_downloader_reports_io_errors() {
    let dir = scratch_dir();
    std::fs::create_dir_all(&dir).unwrap();
    // A file where the directory should be.
    let blocker = dir.join("blocked");
    std::fs::write(&blocker, "x").unwrap();

    let downloader = DirectoryDownloader::new(&blocker);
    let doc = ExportDocument { file_name: "out.json".to_owned(), contents: "{}".to_owned() };
    let err = downloader.download(&doc).unwrap_err();
    assert!(matches!(err, FormError::Io { .. }));
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn path_for_joins_directory() {
    let downloader = DirectoryDownloader::new("/tmp/exports");
    assert_eq!(downloader.path_for("a.json"), PathBuf::from("/tmp/exports/a.json"));
    assert_eq!(downloader.dir(), Path::new("/tmp/exports"));
}
