//! Interactive confirmation prompts

use anyhow::Result;
use std::io::{self, BufRead, Write};

/// Prompt for confirmation
///
/// Returns true if user confirms, false otherwise.
/// In non-interactive mode (no TTY), returns false.
pub fn confirm(prompt: &str) -> Result<bool> {
    if !atty::is(atty::Stream::Stdin) {
        return Ok(false);
    }

    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let stdin = io::stdin();
    read_confirmation(&mut stdin.lock())
}

/// Read one answer line; only "y" or "yes" (any case) confirms
fn read_confirmation(input: &mut impl BufRead) -> Result<bool> {
    let mut line = String::new();
    input.read_line(&mut line)?;

    let answer = line.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(text: &str) -> bool {
        read_confirmation(&mut text.as_bytes()).unwrap()
    }

    #[test]
    fn test_yes_answers() {
        assert!(answer("y\n"));
        assert!(answer("YES\n"));
        assert!(answer("  yes  \n"));
    }

    #[test]
    fn test_other_answers_decline() {
        assert!(!answer("\n"));
        assert!(!answer("n\n"));
        assert!(!answer("yep\n"));
        assert!(!answer(""));
    }
}
