//! Terminal reporting for docnav commands.
//!
//! Everything goes to stderr so page data piped from stdout stays clean.

use std::fmt::Display;
use std::path::Path;

use console::{Term, style};
use docnav_site::{BuildResult, Diagnostic};

/// Build progress and outcome reporter.
pub(crate) struct Output {
    term: Term,
}

impl Output {
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    fn line(&self, line: &str) {
        let _ = self.term.write_line(line);
    }

    /// Print a resolved input or output location.
    pub(crate) fn location(&self, label: &str, path: &Path) {
        self.line(&format!(
            "{} {}",
            style(format!("{label:>8}")).dim(),
            path.display()
        ));
    }

    /// Print one build problem.
    pub(crate) fn diagnostic(&self, diagnostic: &Diagnostic) {
        self.line(&format!("{} {diagnostic}", style("warning:").yellow().bold()));
    }

    /// Print the page and problem counts of a finished build.
    pub(crate) fn summary(&self, result: &BuildResult) {
        let line = summary_line(result.records.len(), result.diagnostics.len());
        if result.is_successful() {
            self.line(&style(line).green().to_string());
        } else {
            self.line(&style(line).yellow().to_string());
        }
    }

    /// Print a fatal error.
    pub(crate) fn error(&self, err: &dyn Display) {
        self.line(&format!("{} {err}", style("error:").red().bold()));
    }
}

fn summary_line(pages: usize, problems: usize) -> String {
    let plural = |n: usize| if n == 1 { "" } else { "s" };
    let mut line = format!("Generated page data for {pages} page{}", plural(pages));
    if problems > 0 {
        line.push_str(&format!(" with {problems} warning{}", plural(problems)));
    }
    line
}
