pub mod constants;
pub mod dto;

pub use constants::*;
pub use dto::*;
