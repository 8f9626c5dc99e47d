pub mod cycle;
pub mod dates;
pub mod plot;
pub mod timeline;
