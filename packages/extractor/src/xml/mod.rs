//! XML utilities for CAMT documents.

mod query;

pub use query::{text_of, text_opt, NsQuery};
