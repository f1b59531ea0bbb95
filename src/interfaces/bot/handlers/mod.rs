pub mod callbacks;
pub mod start;
pub mod text;
