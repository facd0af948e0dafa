pub mod charts;
pub mod dashboard;
pub mod prediction_form;
pub mod prediction_result;
