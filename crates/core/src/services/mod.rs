pub mod aggregate_service;
pub mod budget_service;
pub mod category_service;
pub mod chart_service;
pub mod sample_data_service;
pub mod transaction_service;
