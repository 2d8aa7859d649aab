pub mod banner;
pub mod spinner;

pub use banner::{display_welcome_banner, render_banner};
pub use spinner::with_spinner;
