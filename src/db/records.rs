//! Typed per-subject records stored as JSON values in the key-value table.

use super::kv;
use crate::error::Result;
use crate::models::{AnswerRecord, ExamRecord, StudyProgress};
use rusqlite::Connection;
use serde::Serialize;
use serde::de::DeserializeOwned;

pub const WRONG_ANSWERS: &str = "wrong_answers";
pub const STUDY_PROGRESS: &str = "study_progress";
pub const EXAM_RESULTS: &str = "exam_results";
pub const EXAM_RECORDS: &str = "exam_records";
pub const SELECTED_SUBJECT: &str = "selected_subject";

pub fn storage_key(base: &str, subject_id: &str) -> String {
    format!("{}_{}", base, subject_id)
}

/// Missing keys read as `T::default()`; malformed JSON is an error.
fn read_json<T: DeserializeOwned + Default>(conn: &Connection, key: &str) -> Result<T> {
    match kv::get_value(conn, key)? {
        Some(text) => Ok(serde_json::from_str(&text)?),
        None => Ok(T::default()),
    }
}

fn write_json<T: Serialize + ?Sized>(conn: &Connection, key: &str, value: &T) -> Result<()> {
    let text = serde_json::to_string(value)?;
    kv::set_value(conn, key, &text)?;
    log::debug!("stored {} ({} bytes)", key, text.len());
    Ok(())
}

fn remove(conn: &Connection, key: &str) -> Result<()> {
    kv::remove_value(conn, key)?;
    log::debug!("removed {}", key);
    Ok(())
}

pub fn get_wrong_answers(conn: &Connection, subject_id: &str) -> Result<Vec<AnswerRecord>> {
    read_json(conn, &storage_key(WRONG_ANSWERS, subject_id))
}

pub fn add_wrong_answer(conn: &Connection, subject_id: &str, record: &AnswerRecord) -> Result<()> {
    let mut answers = get_wrong_answers(conn, subject_id)?;
    answers.push(AnswerRecord {
        subject_id: Some(subject_id.to_string()),
        ..record.clone()
    });
    write_json(conn, &storage_key(WRONG_ANSWERS, subject_id), &answers)
}

pub fn remove_wrong_answer(conn: &Connection, subject_id: &str, id: &str) -> Result<()> {
    let mut answers = get_wrong_answers(conn, subject_id)?;
    answers.retain(|a| a.id != id);
    write_json(conn, &storage_key(WRONG_ANSWERS, subject_id), &answers)
}

pub fn clear_wrong_answers(conn: &Connection, subject_id: &str) -> Result<()> {
    remove(conn, &storage_key(WRONG_ANSWERS, subject_id))
}

pub fn get_progress(conn: &Connection, subject_id: &str) -> Result<StudyProgress> {
    read_json(conn, &storage_key(STUDY_PROGRESS, subject_id))
}

pub fn set_progress(conn: &Connection, subject_id: &str, progress: &StudyProgress) -> Result<()> {
    write_json(conn, &storage_key(STUDY_PROGRESS, subject_id), progress)
}

pub fn get_exam_results(conn: &Connection, subject_id: &str) -> Result<Vec<AnswerRecord>> {
    read_json(conn, &storage_key(EXAM_RESULTS, subject_id))
}

pub fn save_exam_results(
    conn: &Connection,
    subject_id: &str,
    results: &[AnswerRecord],
) -> Result<()> {
    write_json(conn, &storage_key(EXAM_RESULTS, subject_id), results)
}

pub fn clear_exam_results(conn: &Connection, subject_id: &str) -> Result<()> {
    remove(conn, &storage_key(EXAM_RESULTS, subject_id))
}

pub fn get_exam_records(conn: &Connection, subject_id: &str) -> Result<Vec<ExamRecord>> {
    read_json(conn, &storage_key(EXAM_RECORDS, subject_id))
}

pub fn save_exam_record(conn: &Connection, subject_id: &str, record: &ExamRecord) -> Result<()> {
    let mut records = get_exam_records(conn, subject_id)?;
    records.push(ExamRecord {
        subject_id: Some(subject_id.to_string()),
        ..record.clone()
    });
    write_json(conn, &storage_key(EXAM_RECORDS, subject_id), &records)
}

pub fn clear_exam_records(conn: &Connection, subject_id: &str) -> Result<()> {
    remove(conn, &storage_key(EXAM_RECORDS, subject_id))
}

pub fn get_selected_subject(conn: &Connection) -> Result<Option<String>> {
    Ok(kv::get_value(conn, SELECTED_SUBJECT)?)
}

pub fn set_selected_subject(conn: &Connection, subject_id: &str) -> Result<()> {
    kv::set_value(conn, SELECTED_SUBJECT, subject_id)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuizError;
    use crate::models::QuestionKind;
    use crate::test_support::memory_db;

    #[test]
    fn test_storage_keys() {
        assert_eq!(storage_key(WRONG_ANSWERS, "marx"), "wrong_answers_marx");
        assert_eq!(storage_key(STUDY_PROGRESS, "bio"), "study_progress_bio");
        assert_eq!(storage_key(EXAM_RESULTS, "med_bio"), "exam_results_med_bio");
        assert_eq!(storage_key(EXAM_RECORDS, "marx"), "exam_records_marx");
    }

    #[test]
    fn test_missing_keys_read_as_defaults() {
        let conn = memory_db();
        assert!(get_wrong_answers(&conn, "marx").unwrap().is_empty());
        assert!(get_exam_results(&conn, "marx").unwrap().is_empty());
        assert!(get_exam_records(&conn, "marx").unwrap().is_empty());
        assert_eq!(get_progress(&conn, "marx").unwrap(), StudyProgress::default());
        assert_eq!(get_selected_subject(&conn).unwrap(), None);
    }

    #[test]
    fn test_progress_round_trip() {
        let conn = memory_db();
        let progress = StudyProgress {
            single_index: 12,
            multiple_index: 3,
            true_false_index: 7,
            last_updated: 1_700_000_000_000,
        };
        set_progress(&conn, "marx", &progress).unwrap();
        assert_eq!(get_progress(&conn, "marx").unwrap(), progress);
        assert_eq!(get_progress(&conn, "bio").unwrap(), StudyProgress::default());
    }

    #[test]
    fn test_progress_is_stored_as_camel_case_json() {
        let conn = memory_db();
        set_progress(&conn, "marx", &StudyProgress::default()).unwrap();
        let raw = kv::get_value(&conn, "study_progress_marx").unwrap().unwrap();
        assert!(raw.contains("\"singleIndex\":0"));
        assert!(raw.contains("\"trueFalseIndex\":0"));
    }

    #[test]
    fn test_wrong_answers_append_and_remove() {
        let conn = memory_db();
        let first = AnswerRecord::wrong("marx", QuestionKind::Single, 1, "B", "A");
        let second = AnswerRecord::wrong("marx", QuestionKind::Multiple, 2, "AB", "AC");
        add_wrong_answer(&conn, "marx", &first).unwrap();
        add_wrong_answer(&conn, "marx", &second).unwrap();

        let stored = get_wrong_answers(&conn, "marx").unwrap();
        assert_eq!(stored, vec![first.clone(), second.clone()]);

        remove_wrong_answer(&conn, "marx", &first.id).unwrap();
        assert_eq!(get_wrong_answers(&conn, "marx").unwrap(), vec![second]);
    }

    #[test]
    fn test_add_wrong_answer_stamps_subject() {
        let conn = memory_db();
        let mut record = AnswerRecord::wrong("marx", QuestionKind::Single, 1, "B", "A");
        record.subject_id = None;
        add_wrong_answer(&conn, "bio", &record).unwrap();

        let stored = get_wrong_answers(&conn, "bio").unwrap();
        assert_eq!(stored[0].subject_id.as_deref(), Some("bio"));
    }

    #[test]
    fn test_clear_wrong_answers_is_scoped_to_subject() {
        let conn = memory_db();
        add_wrong_answer(
            &conn,
            "bio",
            &AnswerRecord::wrong("bio", QuestionKind::Single, 0, "B", "A"),
        )
        .unwrap();
        add_wrong_answer(
            &conn,
            "marx",
            &AnswerRecord::wrong("marx", QuestionKind::Single, 0, "C", "A"),
        )
        .unwrap();

        clear_wrong_answers(&conn, "bio").unwrap();

        assert!(get_wrong_answers(&conn, "bio").unwrap().is_empty());
        assert_eq!(get_wrong_answers(&conn, "marx").unwrap().len(), 1);
    }

    #[test]
    fn test_exam_results_are_overwritten() {
        let conn = memory_db();
        let a = AnswerRecord::wrong("marx", QuestionKind::Single, 0, "", "A");
        let b = AnswerRecord::wrong("marx", QuestionKind::TrueFalse, 1, "A", "B");
        save_exam_results(&conn, "marx", &[a.clone(), b]).unwrap();
        save_exam_results(&conn, "marx", &[a.clone()]).unwrap();

        assert_eq!(get_exam_results(&conn, "marx").unwrap(), vec![a]);

        clear_exam_results(&conn, "marx").unwrap();
        assert!(get_exam_results(&conn, "marx").unwrap().is_empty());
    }

    #[test]
    fn test_exam_records_append_and_clear() {
        let conn = memory_db();
        save_exam_record(&conn, "marx", &ExamRecord::new("marx", 40, 37)).unwrap();
        save_exam_record(&conn, "marx", &ExamRecord::new("marx", 40, 20)).unwrap();

        let records = get_exam_records(&conn, "marx").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].accuracy, 93);
        assert_eq!(records[1].accuracy, 50);

        clear_exam_records(&conn, "marx").unwrap();
        assert!(get_exam_records(&conn, "marx").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let conn = memory_db();
        kv::set_value(&conn, "wrong_answers_marx", "[{broken").unwrap();

        let err = get_wrong_answers(&conn, "marx").unwrap_err();
        assert!(matches!(err, QuizError::Json(_)));
    }

    #[test]
    fn test_selected_subject_round_trip() {
        let conn = memory_db();
        set_selected_subject(&conn, "bio").unwrap();
        assert_eq!(get_selected_subject(&conn).unwrap(), Some("bio".to_string()));
    }
}
