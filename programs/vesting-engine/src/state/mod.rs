pub mod claim;
pub mod config;
pub mod holder;
pub mod schedule;

pub use claim::*;
pub use config::*;
pub use holder::*;
pub use schedule::*;
