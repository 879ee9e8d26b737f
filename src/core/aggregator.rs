use crate::domain::model::{ExamRecord, StudentGroup};
use std::cmp::Ordering;
use std::collections::HashMap;

type StudentKey = (String, String, String);

fn key_of(record: &ExamRecord) -> StudentKey {
    (
        record.student_id.clone(),
        record.last_name.clone(),
        record.first_name.clone(),
    )
}

fn compare_groups(a: &StudentGroup, b: &StudentGroup) -> Ordering {
    a.display_name()
        .to_lowercase()
        .cmp(&b.display_name().to_lowercase())
        .then_with(|| a.student_id.cmp(&b.student_id))
        .then_with(|| a.last_name.cmp(&b.last_name))
        .then_with(|| a.first_name.cmp(&b.first_name))
}

/// Groups records by exact student identity. Groups come out sorted by
/// "last first" ignoring case; each group's records are newest first, with
/// missing or unparseable timestamps last.
pub fn group(records: &[ExamRecord]) -> Vec<StudentGroup> {
    let mut by_student: HashMap<StudentKey, Vec<ExamRecord>> = HashMap::new();
    for record in records {
        by_student
            .entry(key_of(record))
            .or_default()
            .push(record.clone());
    }

    let mut groups: Vec<StudentGroup> = by_student
        .into_iter()
        .map(|((student_id, last_name, first_name), mut records)| {
            // Stable: equal timestamps keep their input order.
            records.sort_by_key(|r| std::cmp::Reverse(r.submitted_at_parsed()));
            StudentGroup {
                student_id,
                last_name,
                first_name,
                records,
            }
        })
        .collect();

    groups.sort_by(compare_groups);
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::GradeBand;

    fn record(id: &str, last: &str, first: &str, grade: u8, ts: Option<&str>) -> ExamRecord {
        ExamRecord {
            student_id: id.to_string(),
            last_name: last.to_string(),
            first_name: first.to_string(),
            exam_name: format!("Exam {grade}"),
            grade,
            honors: false,
            program: "Informatica".to_string(),
            submitted_at: ts.map(str::to_string),
        }
    }

    #[test]
    fn test_empty_input_gives_no_groups() {
        assert!(group(&[]).is_empty());
    }

    #[test]
    fn test_groups_sorted_case_insensitively() {
        let records = vec![
            record("300", "verdi", "Luca", 20, None),
            record("100", "Bianchi", "Marco", 25, None),
            record("200", "Rossi", "Anna", 30, None),
        ];

        let names: Vec<String> = group(&records).iter().map(|g| g.display_name()).collect();
        assert_eq!(names, vec!["Bianchi Marco", "Rossi Anna", "verdi Luca"]);
    }

    #[test]
    fn test_identity_is_case_sensitive() {
        let records = vec![
            record("100", "Rossi", "Anna", 30, None),
            record("100", "ROSSI", "Anna", 30, None),
        ];
        assert_eq!(group(&records).len(), 2);
    }

    #[test]
    fn test_records_newest_first_with_unparseable_last() {
        let records = vec![
            record("100", "Rossi", "Anna", 18, Some("2024-01-10T10:00:00+01:00")),
            record("100", "Rossi", "Anna", 19, Some("not a date")),
            record("100", "Rossi", "Anna", 20, Some("2024-03-01T08:30:00+01:00")),
            record("100", "Rossi", "Anna", 21, None),
            record("100", "Rossi", "Anna", 22, Some("2024-02-15T12:00:00+01:00")),
        ];

        let groups = group(&records);
        assert_eq!(groups.len(), 1);
        let grades: Vec<u8> = groups[0].records.iter().map(|r| r.grade).collect();
        assert_eq!(grades, vec![20, 22, 18, 19, 21]);
    }

    #[test]
    fn test_timestamps_compared_across_offsets() {
        let records = vec![
            record("100", "Rossi", "Anna", 18, Some("2024-01-10T10:00:00+02:00")),
            record("100", "Rossi", "Anna", 30, Some("2024-01-10T09:30:00+00:00")),
        ];
        let grades: Vec<u8> = group(&records)[0].records.iter().map(|r| r.grade).collect();
        assert_eq!(grades, vec![30, 18]);
    }

    #[test]
    fn test_grouping_ignores_input_order() {
        let mut records = vec![
            record("100", "Rossi", "Anna", 30, Some("2024-01-01T10:00:00+01:00")),
            record("200", "Bianchi", "Marco", 24, Some("2024-01-02T10:00:00+01:00")),
            record("100", "Rossi", "Anna", 27, Some("2024-01-03T10:00:00+01:00")),
            record("300", "Rossi", "Anna", 19, Some("2024-01-04T10:00:00+01:00")),
            record("200", "Bianchi", "Marco", 29, Some("2024-01-05T10:00:00+01:00")),
        ];
        let forward = group(&records);
        records.reverse();
        let backward = group(&records);
        records.rotate_left(2);
        let rotated = group(&records);

        assert_eq!(forward, backward);
        assert_eq!(forward, rotated);
        assert_eq!(forward.len(), 3);
    }

    #[test]
    fn test_average_and_bands() {
        let records = vec![
            record("100", "Rossi", "Anna", 30, None),
            record("100", "Rossi", "Anna", 30, None),
            record("100", "Rossi", "Anna", 24, None),
        ];
        let groups = group(&records);
        assert_eq!(groups[0].average_display(), "28.00");
        assert!(groups[0]
            .records
            .iter()
            .all(|r| r.band() == GradeBand::classify(r.grade)));
    }
}
