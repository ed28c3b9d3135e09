pub mod assignments;

pub mod notifications;

pub mod submissions;

pub mod timeline;

pub mod websocket;

pub use assignments::configure_assignments_routes;
pub use notifications::configure_notifications_routes;
pub use submissions::configure_submissions_routes;
pub use timeline::configure_timeline_routes;
pub use websocket::configure_websocket_routes;
