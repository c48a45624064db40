//! Core domain types for the startup store sanitizer.
//! - Value universe of the persisted preference store.
//! - Snapshot summary consumed by health policies.
//! - Outcome record consumed by observability tooling.

pub mod errors;
pub mod outcome;
pub mod snapshot;
pub mod value;

pub use errors::StoreError;
pub use outcome::{ActionTaken, ErrorKind, Outcome, Verdict};
pub use snapshot::StoreSnapshot;
pub use value::PrefValue;
