pub mod chart;
pub mod help;
pub mod history;
pub mod records;
