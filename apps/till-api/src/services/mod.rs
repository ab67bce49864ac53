//! Service layer.
//!
//! Handlers stay thin: they parse the request, call one service method and
//! shape the response.

pub mod report_service;
pub mod till_service;

pub use report_service::ReportService;
pub use till_service::TillService;
