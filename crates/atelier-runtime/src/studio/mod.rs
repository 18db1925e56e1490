//! Studio state and per-viewer read models.

mod error;
mod state;
mod view;

pub use error::StateError;
pub use state::StudioState;
pub use view::{ProjectView, StageView};
