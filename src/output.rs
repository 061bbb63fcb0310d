//! Console output for startup.
//!
//! Startup progress is printed for the operator ("Checking nmap... OK")
//! alongside the structured log, styled with `console`.

use console::style;
use std::fmt::Display;
use std::io::{self, Write};

/// Prints startup steps unless running quietly.
pub struct StartupReporter {
    quiet: bool,
}

impl StartupReporter {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Run `f` as a named step, printing its outcome.
    pub fn step<T, E>(
        &self,
        label: &str,
        f: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, E> {
        if !self.quiet {
            print!("{} {}... ", style("•").dim(), label);
            let _ = io::stdout().flush();
        }
        let result = f();
        if !self.quiet {
            match &result {
                Ok(_) => println!("{}", style("OK").green().bold()),
                Err(_) => println!("{}", style("FAILED").red().bold()),
            }
        }
        result
    }

    /// Print the banner shown once the server is about to accept requests.
    pub fn ready(&self, url: impl Display, history_rows: u64) {
        if self.quiet {
            return;
        }
        println!();
        println!(
            "{} {} v{}",
            style("Starting").cyan(),
            style("scanweb").cyan().bold(),
            env!("CARGO_PKG_VERSION")
        );
        println!("{} Listening on {}", style("•").dim(), style(url).white().bold());
        println!("{} {} scans in history", style("•").dim(), history_rows);
        println!();
    }
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_passes_result_through() {
        let reporter = StartupReporter::new(true);
        assert_eq!(reporter.step("ok", || Ok::<_, String>(7)).unwrap(), 7);
        assert_eq!(
            reporter.step("fail", || Err::<(), _>("nope".to_string())),
            Err("nope".to_string())
        );
    }
}
