// Screening quizzes: strict generation (no repair), client view without
// answer keys, and grading of submitted attempts.

pub mod generator;
pub mod grading;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod store;
pub mod validation;
