//! Query history domain.
//!
//! - [`QueryRecord`]: one normalized past query
//! - [`HistoryList`]: the persisted, duplicate-free list of records

mod history_list;
mod query_record;

pub use history_list::HistoryList;
pub use query_record::QueryRecord;
