//! CLI output: error mapping from shell errors to a stable one-line surface.

use crate::error::ShellError;

/// Map an error to the single line shown to the user.
pub fn map_error(e: &ShellError) -> String {
    let message = e.to_string();
    message.lines().next().unwrap_or_default().trim_end().to_string()
}
