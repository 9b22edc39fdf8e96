// Readiness reports: analysis + optional quiz attempt → metrics, improvements
// and a Markdown export.

pub mod handlers;
pub mod markdown;
pub mod readiness;
pub mod store;
