//! Maps UI service errors to forecast_core::AppError for consistent user-facing messages.
//! Each service has its own module to keep mappings small and readable.

mod weather;
