pub mod aggregator;
pub mod intake;
pub mod validator;

pub use crate::domain::model::{ExamRecord, GradeBand, RequestMethod, StudentGroup, Submission};
pub use crate::domain::ports::{Clock, RecordStore, SystemClock};
pub use crate::utils::error::Result;
