pub mod aggregate;
pub mod budget;
pub mod category;
pub mod chart;
pub mod sample;
pub mod settings;
pub mod snapshot;
pub mod transaction;
