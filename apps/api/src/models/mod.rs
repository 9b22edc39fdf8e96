pub mod analysis;
pub mod quiz;
pub mod report;
