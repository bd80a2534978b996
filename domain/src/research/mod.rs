//! Research task records shared by planners, retrievers and the control loop.

pub mod entities;
pub mod expansion;

pub use entities::{
    Observation, ResearchStep, RetrievalRecord, StepDecision, StopCause, Subtask,
};
pub use expansion::{expand_query, query_for_step};
