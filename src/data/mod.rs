pub mod csv_reader;
pub mod table;

pub use csv_reader::{parse_f64, TableReader};
pub use table::DataTable;
