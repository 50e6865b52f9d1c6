pub mod catalog;
pub mod grading;

pub use catalog::{
    compare_grading_services, worth_grading, CostEstimate, GradingServiceInfo, ServiceTier,
    SubmissionStatus, SubmissionTracker, SubmissionUpdate,
};
pub use grading::GradingService;
