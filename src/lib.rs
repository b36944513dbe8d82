//! Forensic analysis engine for small-business financial records.
//!
//! The core is three pure, stateless pieces over immutable canonical
//! records: a layered per-transaction risk scorer ([`scorer`]), a monthly
//! roll-up with a silence-pattern override ([`monthly`]), and five
//! cross-record pattern scans ([`patterns`]). The [`normalizer`] adapts
//! raw data-entry shapes into canonical records at the boundary, and
//! [`cli`] is the thin presentation layer over a JSON case file.

pub mod cli;
pub mod error;
pub mod fmt;
pub mod models;
pub mod monthly;
pub mod normalizer;
pub mod patterns;
pub mod scorer;
