//! Link domain entities.

pub mod model;
pub mod state;
pub mod status;

pub use model::{Link, NewLink};
pub use state::LinkState;
pub use status::{LinkStatus, LinkStatusRow};
