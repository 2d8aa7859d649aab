pub mod prompts;

pub use prompts::{prompt_confirmation, prompt_confirmation_opt};
