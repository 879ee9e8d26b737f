use crate::domain::model::ExamRecord;
use crate::domain::ports::RecordStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Non-durable store scoped to a single request: it only ever sees the
/// records appended through this instance.
#[derive(Debug, Clone, Default)]
pub struct TransientStore {
    records: Arc<Mutex<Vec<ExamRecord>>>,
}

impl TransientStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for TransientStore {
    async fn read_all(&self) -> Result<Vec<ExamRecord>> {
        Ok(self.records.lock().await.clone())
    }

    async fn append(&self, record: ExamRecord) -> Result<()> {
        self.records.lock().await.push(record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_holds_only_what_was_appended() {
        let store = TransientStore::new();
        assert!(store.read_all().await.unwrap().is_empty());

        let record = ExamRecord {
            student_id: "123".to_string(),
            last_name: "Rossi".to_string(),
            first_name: "Anna".to_string(),
            exam_name: "Storia".to_string(),
            grade: 28,
            honors: false,
            program: "Lettere".to_string(),
            submitted_at: None,
        };
        store.append(record.clone()).await.unwrap();

        assert_eq!(store.read_all().await.unwrap(), vec![record]);
        assert!(TransientStore::new().read_all().await.unwrap().is_empty());
    }
}
