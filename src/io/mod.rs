//! File system edges: delimited tables in and out, and report discovery.

pub mod tabular;
pub mod walker;

pub use tabular::{read_method_rows, read_table, write_table, Table};
pub use walker::{find_report_files, ReportWalker};
