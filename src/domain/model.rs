use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// One validated exam outcome, serialized with the field names of the
/// shared data file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamRecord {
    #[serde(rename = "matricola")]
    pub student_id: String,
    #[serde(rename = "cognome")]
    pub last_name: String,
    #[serde(rename = "nome")]
    pub first_name: String,
    #[serde(rename = "esame")]
    pub exam_name: String,
    #[serde(rename = "votazione")]
    pub grade: u8,
    #[serde(rename = "lode", default)]
    pub honors: bool,
    #[serde(rename = "corso")]
    pub program: String,
    #[serde(rename = "ts", default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<String>,
}

impl ExamRecord {
    /// `None` when the timestamp is missing or not RFC 3339.
    pub fn submitted_at_parsed(&self) -> Option<DateTime<FixedOffset>> {
        self.submitted_at
            .as_deref()
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
    }

    /// `YYYY-MM-DD HH:MM` in the timestamp's own offset, or `-`.
    pub fn display_date(&self) -> String {
        self.submitted_at_parsed()
            .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string())
    }

    pub fn band(&self) -> GradeBand {
        GradeBand::classify(self.grade)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeBand {
    High,
    Neutral,
    Low,
}

impl GradeBand {
    pub fn classify(grade: u8) -> Self {
        match grade {
            g if g > 28 => GradeBand::High,
            28 => GradeBand::Neutral,
            _ => GradeBand::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GradeBand::High => "high",
            GradeBand::Neutral => "neutral",
            GradeBand::Low => "low",
        }
    }
}

/// All records sharing one (student_id, last_name, first_name) identity,
/// most recent first.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentGroup {
    pub student_id: String,
    pub last_name: String,
    pub first_name: String,
    pub records: Vec<ExamRecord>,
}

impl StudentGroup {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
    }

    pub fn exam_count(&self) -> usize {
        self.records.len()
    }

    pub fn average(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        let sum: u32 = self.records.iter().map(|r| u32::from(r.grade)).sum();
        f64::from(sum) / self.records.len() as f64
    }

    /// Two decimals, halves rounded away from zero (28.125 -> "28.13").
    pub fn average_display(&self) -> String {
        format!("{:.2}", (self.average() * 100.0).round() / 100.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
    Other,
}

impl RequestMethod {
    pub fn parse(method: &str) -> Self {
        match method.trim().to_ascii_uppercase().as_str() {
            "POST" => RequestMethod::Post,
            "GET" => RequestMethod::Get,
            _ => RequestMethod::Other,
        }
    }
}

/// Raw inbound fields as received at the boundary, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub method: RequestMethod,
    pub student_id: Option<String>,
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub exam_name: Option<String>,
    pub grade: Option<String>,
    pub honors: Option<String>,
    pub program: Option<String>,
}

impl Submission {
    pub fn new(method: RequestMethod) -> Self {
        Self {
            method,
            student_id: None,
            last_name: None,
            first_name: None,
            exam_name: None,
            grade: None,
            honors: None,
            program: None,
        }
    }
}
