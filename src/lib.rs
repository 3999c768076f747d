// ClaimSense: insurance claim document extraction and fraud-risk scoring
//
// This is the library root. Each module corresponds to a subsystem of the
// claim backend: the pure scoring and language heuristics, the model client,
// the request pipelines built on them, and the HTTP/CLI surfaces.

pub mod chat;
pub mod config;
pub mod extraction;
pub mod fraud;
pub mod gemini;
pub mod keepalive;
pub mod language;
pub mod output;
pub mod pipeline;
pub mod web;
