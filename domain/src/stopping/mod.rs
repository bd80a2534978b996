//! Information-saturation stopping for research tasks.

pub mod information;
pub mod policy;

pub use information::InformationState;
pub use policy::{StopReason, StoppingConfig, StoppingPolicy, StoppingState};
