pub mod review;
pub mod words;
