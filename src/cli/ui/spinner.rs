//! Progress indicator for waits the user can't otherwise see, like the
//! registry lookup

use is_terminal::IsTerminal;
use std::future::Future;
use std::io::{self, Write};
use std::time::Duration;

const FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
const FRAME_INTERVAL: Duration = Duration::from_millis(80);

fn clear_line() {
    print!("\r\x1b[K");
    let _ = io::stdout().flush();
}

async fn animate(message: String) {
    let mut ticker = tokio::time::interval(FRAME_INTERVAL);
    for frame in FRAMES.iter().cycle() {
        ticker.tick().await;
        print!("\r{} {}", frame, message);
        let _ = io::stdout().flush();
    }
}

/// Awaits `future` while animating `message` on the current line.
///
/// Output is plain when stdout isn't a terminal.
pub async fn with_spinner<F, T>(message: impl Into<String>, future: F) -> T
where
    F: Future<Output = T>,
{
    if !io::stdout().is_terminal() {
        return future.await;
    }

    let animation = tokio::spawn(animate(message.into()));
    let output = future.await;
    animation.abort();
    let _ = animation.await;
    clear_line();
    output
}
