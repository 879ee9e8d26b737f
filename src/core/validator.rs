use crate::domain::model::{ExamRecord, Submission};
use crate::domain::ports::Clock;
use crate::utils::error::{IntakeError, Result};
use chrono::SecondsFormat;

pub const MIN_STUDENT_ID_LEN: usize = 3;
pub const MIN_GRADE: i64 = 1;
pub const MAX_GRADE: i64 = 30;

pub const MSG_STUDENT_ID: &str = "Student ID is invalid (at least 3 characters).";
pub const MSG_LAST_NAME: &str = "Last name is required.";
pub const MSG_FIRST_NAME: &str = "First name is required.";
pub const MSG_EXAM_NAME: &str = "Exam name is required.";
pub const MSG_GRADE: &str = "Grade must be an integer between 1 and 30.";
pub const MSG_PROGRAM: &str = "Degree program is required.";

fn trimmed(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or_default().to_string()
}

/// Decimal integer in range. Leading zeros ("018") are not accepted.
fn parse_grade(raw: &Option<String>) -> Option<u8> {
    let raw = raw.as_deref()?.trim();
    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    let grade: i64 = raw.parse().ok()?;
    if (MIN_GRADE..=MAX_GRADE).contains(&grade) {
        u8::try_from(grade).ok()
    } else {
        None
    }
}

/// Presence-based flag: any non-empty value other than "0" counts as set.
fn parse_honors(raw: &Option<String>) -> bool {
    matches!(raw.as_deref(), Some(v) if !v.is_empty() && v != "0")
}

/// Checks every field rule and reports all failures together, in field order.
/// On success the record is stamped with the clock's current time.
pub fn validate_submission(submission: &Submission, clock: &dyn Clock) -> Result<ExamRecord> {
    let student_id = trimmed(&submission.student_id);
    let last_name = trimmed(&submission.last_name);
    let first_name = trimmed(&submission.first_name);
    let exam_name = trimmed(&submission.exam_name);
    let grade = parse_grade(&submission.grade);
    let program = trimmed(&submission.program);

    let mut messages = Vec::new();
    if student_id.chars().count() < MIN_STUDENT_ID_LEN {
        messages.push(MSG_STUDENT_ID.to_string());
    }
    if last_name.is_empty() {
        messages.push(MSG_LAST_NAME.to_string());
    }
    if first_name.is_empty() {
        messages.push(MSG_FIRST_NAME.to_string());
    }
    if exam_name.is_empty() {
        messages.push(MSG_EXAM_NAME.to_string());
    }
    if grade.is_none() {
        messages.push(MSG_GRADE.to_string());
    }
    if program.is_empty() {
        messages.push(MSG_PROGRAM.to_string());
    }

    match grade {
        Some(grade) if messages.is_empty() => Ok(ExamRecord {
            student_id,
            last_name,
            first_name,
            exam_name,
            grade,
            honors: parse_honors(&submission.honors),
            program,
            submitted_at: Some(clock.now().to_rfc3339_opts(SecondsFormat::Secs, false)),
        }),
        _ => Err(IntakeError::Validation { messages }),
    }
}
