//! The core article-processing pipeline.
//!
//! Data flows one direction through three synchronous, single-threaded
//! stages, run only after the concurrent fetch stage has fully materialized
//! its result list:
//!
//! 1. [`filter::filter_by_recency`]: drop stale articles (stable filter)
//! 2. [`group::group_by_source`]: partition articles into per-domain buckets
//! 3. [`records::build_session_records`]: one serializable record per bucket
//!
//! Record order in the output is deterministic given deterministic input
//! order: the grouper re-derives order from the originally requested URLs,
//! not from fetch-completion order.

pub mod filter;
pub mod group;
pub mod records;

pub use filter::filter_by_recency;
pub use group::group_by_source;
pub use records::build_session_records;
