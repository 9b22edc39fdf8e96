// Résumé analysis: prompt → one model call → repair → decode → validate →
// partial extraction → default. Only `orchestrator::analyze` is called from
// outside; it never returns an error.

pub mod extract;
pub mod handlers;
pub mod models;
pub mod orchestrator;
pub mod prompts;
pub mod repair;
pub mod store;
pub mod validation;
