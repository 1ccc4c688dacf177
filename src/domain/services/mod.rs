pub mod actions;
mod history;
mod languages;
mod session;
mod sessions;

pub use history::*;
pub use languages::*;
pub use session::*;
pub use sessions::*;
