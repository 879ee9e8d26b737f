// Adapters layer: concrete implementations for external systems (storage, form input).

pub mod form;
pub mod storage;
