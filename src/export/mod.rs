pub mod csv;

pub use csv::{write_csv_file, write_row, write_rows};
