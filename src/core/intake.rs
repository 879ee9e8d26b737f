use crate::core::aggregator;
use crate::core::validator::validate_submission;
use crate::domain::model::{ExamRecord, RequestMethod, StudentGroup, Submission};
use crate::domain::ports::{Clock, RecordStore, SystemClock};
use crate::utils::error::{IntakeError, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum IntakeOutcome {
    /// The submission failed validation; storage was not touched.
    Rejected { errors: Vec<String> },
    /// The full record set, grouped. `accepted` is the record stored by this
    /// request, if any.
    Listing {
        total: usize,
        groups: Vec<StudentGroup>,
        accepted: Option<ExamRecord>,
    },
}

impl IntakeOutcome {
    pub fn status_code(&self) -> u16 {
        200
    }
}

pub struct IntakeService<S: RecordStore> {
    store: S,
    clock: Box<dyn Clock>,
}

impl<S: RecordStore> IntakeService<S> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, Box::new(SystemClock))
    }

    pub fn with_clock(store: S, clock: Box<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Runs one request. Only POST validates and appends; every method then
    /// reads the collection back and groups it.
    pub async fn handle(&self, submission: Submission) -> Result<IntakeOutcome> {
        let accepted = if submission.method == RequestMethod::Post {
            match validate_submission(&submission, self.clock.as_ref()) {
                Ok(record) => {
                    self.store.append(record.clone()).await?;
                    tracing::info!(
                        "Recorded {} for student {} ({})",
                        record.exam_name,
                        record.student_id,
                        record.grade
                    );
                    Some(record)
                }
                Err(IntakeError::Validation { messages }) => {
                    tracing::info!("Submission rejected with {} errors", messages.len());
                    return Ok(IntakeOutcome::Rejected { errors: messages });
                }
                Err(e) => return Err(e),
            }
        } else {
            None
        };

        let records = self.store.read_all().await?;
        let groups = aggregator::group(&records);
        tracing::debug!("Listing {} records in {} groups", records.len(), groups.len());

        Ok(IntakeOutcome::Listing {
            total: records.len(),
            groups,
            accepted,
        })
    }
}
