pub mod calendar_service;
pub mod report_service;

pub use calendar_service::CalendarService;
pub use report_service::ReportService;

use crate::errors::ScheduleError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error("{0}")]
    Invalid(String),
}
