pub mod core;
pub mod data;
pub mod handlers;
pub mod ui;
pub mod utils;

pub use data::*;
pub use ui::*;
