// Request pipelines: the orchestration between the model, the profile
// directory and the pure scoring/detection code.

pub mod conversation;
pub mod document;
