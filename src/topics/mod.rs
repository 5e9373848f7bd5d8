//! Selectable units of work. Each topic runs against the shared
//! [`SessionConfig`](crate::config::SessionConfig) and owns its prompts.

pub mod github_ssh;
pub mod mtls;
pub mod portal;
