//! callboard-core: sales-call records and the analytics built on them.
//!
//! Everything in this crate is pure: no I/O, no shared state. Callers
//! load a collection once (see `callboard-storage`) and derive views
//! from it on every request.
//!
//! # Public API
//!
//! - [`CallRecord`], [`Outcome`], [`CallStatus`] -- the data model
//! - [`decode_calls`] -- validated decoding from untrusted JSON
//! - [`ViewParameters`] + [`filter_and_sort`] -- the call query engine
//! - [`aggregate`] -- summary statistics over any call sequence
//! - [`Dashboard`] and the chart builders in [`dashboard`]
//! - Display helpers in [`format`]

pub mod dashboard;
pub mod decode;
pub mod format;
pub mod query;
pub mod stats;
pub mod types;
pub mod view;

pub use dashboard::{Charts, Dashboard, DashboardFilter};
pub use decode::{decode_call, decode_calls, DecodeError, DecodeReport, RejectedRecord};
pub use query::{filter, filter_and_sort, filter_and_sort_owned, sort};
pub use stats::{aggregate, AggregateStats};
pub use types::{parse_timestamp, ApiResponse, CallRecord, CallStatus, Outcome};
pub use view::{OutcomeFilter, SortKey, ViewParameters};
