pub mod attendance;

pub mod auth;

pub mod exams;

pub mod results;

pub mod students;

pub mod subjects;

pub use attendance::configure_attendance_routes;
pub use auth::configure_auth_routes;
pub use exams::configure_exams_routes;
pub use results::configure_results_routes;
pub use students::configure_student_routes;
pub use subjects::configure_subject_routes;
