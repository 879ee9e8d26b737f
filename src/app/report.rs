use crate::core::intake::IntakeOutcome;
use crate::domain::model::StudentGroup;
use crate::utils::error::IntakeError;
use std::fmt::Write;

fn render_group(out: &mut String, group: &StudentGroup) {
    let _ = writeln!(
        out,
        "{} | Student ID: {} | Exams: {} | Average: {}",
        group.display_name(),
        group.student_id,
        group.exam_count(),
        group.average_display()
    );
    for record in &group.records {
        let _ = writeln!(
            out,
            "  [{:<7}] {:<16}  {}  {}  honors: {}  {}",
            record.band().as_str(),
            record.display_date(),
            record.exam_name,
            record.grade,
            if record.honors { "yes" } else { "no" },
            record.program
        );
    }
}

pub fn render_outcome(outcome: &IntakeOutcome) -> String {
    let mut out = String::new();
    match outcome {
        IntakeOutcome::Rejected { errors } => {
            out.push_str("Validation errors:\n");
            for error in errors {
                let _ = writeln!(out, "  - {}", error);
            }
        }
        IntakeOutcome::Listing { total, groups, .. } => {
            out.push_str("Registered exams\n");
            let _ = writeln!(out, "Total records: {}.", total);
            if groups.is_empty() {
                out.push_str("\nNo exams registered yet.\n");
            }
            for group in groups {
                out.push('\n');
                render_group(&mut out, group);
            }
        }
    }
    out
}

pub fn render_error(error: &IntakeError) -> String {
    format!("{}\n", error.user_friendly_message())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ExamRecord;

    fn record(grade: u8) -> ExamRecord {
        ExamRecord {
            student_id: "123456".to_string(),
            last_name: "Rossi".to_string(),
            first_name: "Anna".to_string(),
            exam_name: "Analisi I".to_string(),
            grade,
            honors: grade == 30,
            program: "Informatica".to_string(),
            submitted_at: Some("2024-06-03T09:15:42+02:00".to_string()),
        }
    }

    #[test]
    fn test_render_listing() {
        let outcome = IntakeOutcome::Listing {
            total: 2,
            groups: crate::core::aggregator::group(&[record(30), record(26)]),
            accepted: None,
        };
        let text = render_outcome(&outcome);

        assert!(text.contains("Total records: 2."));
        assert!(text.contains("Rossi Anna | Student ID: 123456 | Exams: 2 | Average: 28.00"));
        assert!(text.contains("[high   ] 2024-06-03 09:15"));
        assert!(text.contains("honors: yes"));
        assert!(text.contains("[low    ]"));
    }

    #[test]
    fn test_render_empty_listing() {
        let outcome = IntakeOutcome::Listing {
            total: 0,
            groups: vec![],
            accepted: None,
        };
        assert!(render_outcome(&outcome).contains("No exams registered yet."));
    }

    #[test]
    fn test_render_rejected_lists_every_error() {
        let outcome = IntakeOutcome::Rejected {
            errors: vec!["First.".to_string(), "Second.".to_string()],
        };
        assert_eq!(render_outcome(&outcome), "Validation errors:\n  - First.\n  - Second.\n");
    }
}
