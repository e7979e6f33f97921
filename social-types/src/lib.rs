pub mod models;
pub mod enums;
pub mod feed;

pub use models::*;
pub use enums::*;
pub use feed::*;
