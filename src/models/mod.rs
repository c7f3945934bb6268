pub mod review;

pub use review::{ExportRow, ReviewRecord, Sort};
