//! Cleaning pipeline for raw airline-review CSV exports: normalize headers,
//! reparse dates to ISO, derive the verification flag, coerce ratings to
//! nullable integers, and audit the result.

pub mod check;
pub mod pipeline;
pub mod table;
