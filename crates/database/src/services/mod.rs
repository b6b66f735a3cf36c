pub mod course;
pub mod memory;
pub mod store;

pub use course::CourseService;
pub use memory::MemoryCourseStore;
pub use store::{CourseStore, StoreError};
