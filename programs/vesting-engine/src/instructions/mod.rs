pub mod admin;
pub mod balance_view;
pub mod claim;
pub mod create_schedule;
pub mod fund;
pub mod initialize;
pub mod quote;
pub mod release;
pub mod release_all;
pub mod revoke;
pub mod update_schedule;
pub mod withdraw;

pub use admin::*;
pub use balance_view::*;
pub use claim::*;
pub use create_schedule::*;
pub use fund::*;
pub use initialize::*;
pub use quote::*;
pub use release::*;
pub use release_all::*;
pub use revoke::*;
pub use update_schedule::*;
pub use withdraw::*;
