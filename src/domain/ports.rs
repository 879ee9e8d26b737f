use crate::domain::model::ExamRecord;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Local};

/// Record persistence capability. Implementations must make `append`
/// read the current collection and rewrite it whole while holding
/// exclusive access, so concurrent writers never lose each other's records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Current collection. Missing or malformed data reads as empty.
    async fn read_all(&self) -> Result<Vec<ExamRecord>>;

    async fn append(&self, record: ExamRecord) -> Result<()>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

#[async_trait]
impl<T: RecordStore + ?Sized> RecordStore for Box<T> {
    async fn read_all(&self) -> Result<Vec<ExamRecord>> {
        (**self).read_all().await
    }

    async fn append(&self, record: ExamRecord) -> Result<()> {
        (**self).append(record).await
    }
}
