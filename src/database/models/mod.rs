pub mod credit;
pub mod user;

pub use credit::*;
pub use user::*;
