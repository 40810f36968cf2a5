//! Log parsing for WIC "Completed: <op> in <n>ms" timing lines.

pub mod parse;
pub mod row;

pub use parse::{parse_log_text, read_log_input};
pub use row::OperationLog;
