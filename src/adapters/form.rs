use crate::domain::model::{RequestMethod, Submission};
use url::form_urlencoded;

/// Decodes an `application/x-www-form-urlencoded` body using the intake
/// form's field names. Unknown fields are ignored; for repeated fields the
/// last value wins.
pub fn decode_submission(method: RequestMethod, body: &[u8]) -> Submission {
    let mut submission = Submission::new(method);
    for (name, value) in form_urlencoded::parse(body) {
        let value = Some(value.into_owned());
        match name.as_ref() {
            "matricola" => submission.student_id = value,
            "cognome" => submission.last_name = value,
            "nome" => submission.first_name = value,
            "esame" => submission.exam_name = value,
            "votazione" => submission.grade = value,
            "lode" => submission.honors = value,
            "corso" => submission.program = value,
            other => tracing::debug!("Ignoring unknown form field '{}'", other),
        }
    }
    submission
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_boundary_field_names() {
        let body = b"matricola=123456&cognome=D%27Amico&nome=Anna+Maria&esame=Analisi+I&votazione=30&lode=on&corso=Informatica";
        let submission = decode_submission(RequestMethod::Post, body);

        assert_eq!(submission.method, RequestMethod::Post);
        assert_eq!(submission.student_id.as_deref(), Some("123456"));
        assert_eq!(submission.last_name.as_deref(), Some("D'Amico"));
        assert_eq!(submission.first_name.as_deref(), Some("Anna Maria"));
        assert_eq!(submission.grade.as_deref(), Some("30"));
        assert_eq!(submission.honors.as_deref(), Some("on"));
        assert_eq!(submission.program.as_deref(), Some("Informatica"));
    }

    #[test]
    fn test_absent_fields_stay_none() {
        let submission = decode_submission(RequestMethod::Post, b"matricola=123&extra=1");
        assert!(submission.honors.is_none());
        assert!(submission.exam_name.is_none());
    }
}
