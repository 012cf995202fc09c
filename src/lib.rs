pub mod error;
pub mod games;
pub mod logger;
pub mod replay;

pub use error::GameError;
pub use games::SessionRng;
