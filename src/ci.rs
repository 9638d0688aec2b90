use std::io::{self, Write};

/// True when running inside a GitHub Actions job.
pub fn in_actions() -> bool {
    matches!(std::env::var("GITHUB_ACTIONS").as_deref(), Ok("true"))
}

/// Workflow-command data escaping (`%`, CR and LF).
fn escape_data(s: &str) -> String {
    s.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}

fn error_command(message: &str) -> String {
    format!("::error::{}", escape_data(message))
}

/// Mark the enclosing step failed with `message`. Annotations go to stdout.
pub fn set_failed(message: &str) -> io::Result<()> {
    let mut out = io::stdout();
    writeln!(out, "{}", error_command(message))?;
    out.flush()
}
