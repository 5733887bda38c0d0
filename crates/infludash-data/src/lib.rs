//! Dataset preparation: reads the influencer CSV once at startup, drops
//! incomplete or malformed rows, coerces timestamps and derives the
//! engagement rate for every kept record.

pub mod error;
pub mod prepare;
pub mod timestamp;

pub use error::DataError;
pub use prepare::{load_dataset, prepare_from_reader, PrepReport, Prepared};
pub use timestamp::parse_timestamp;
