pub mod access;
pub mod assignments;
pub mod notifications;
pub mod submissions;
pub mod timeline;
pub mod websocket;

pub use assignments::AssignmentService;
pub use notifications::NotificationService;
pub use submissions::SubmissionService;
pub use timeline::TimelineService;
