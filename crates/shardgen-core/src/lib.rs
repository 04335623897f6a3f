pub mod account;
pub mod amount;
pub mod constants;
pub mod error;
pub mod types;

pub use account::*;
pub use constants::*;
pub use error::GenError;
pub use types::*;
