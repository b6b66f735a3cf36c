pub mod category;
pub mod course;
pub mod decorated;
pub mod score;
