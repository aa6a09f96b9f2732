//! Shell completion scripts.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::HabitError;

/// Generate the completion script for `shell`.
///
/// # Errors
///
/// Returns `HabitError::Parse` if the generated script is not valid UTF-8.
pub fn completions(shell: Shell) -> Result<String, HabitError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "habitflow", &mut buf);
    String::from_utf8(buf).map_err(|e| HabitError::Parse(format!("UTF-8 error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_bash() {
        let script = completions(Shell::Bash).unwrap();
        assert!(script.contains("habitflow"));
        assert!(script.contains("toggle"));
    }

    #[test]
    fn test_generate_fish() {
        let script = completions(Shell::Fish).unwrap();
        assert!(script.contains("complete -c habitflow"));
    }
}
