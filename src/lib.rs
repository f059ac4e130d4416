pub mod board;
pub mod project;
pub mod storage;
pub mod ui;
