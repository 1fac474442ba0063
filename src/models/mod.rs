pub mod country;
pub mod user;
pub mod word;

pub use country::*;
pub use user::*;
pub use word::*;
