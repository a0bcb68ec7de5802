pub use super::config::ServiceConfig;
pub use super::error::Error;
pub use super::service::IrisService;
pub use super::store::{EnrollmentRecord, GalleryStats, GalleryStore, SubjectId};
