//! Interactive operator prompts.

use std::fmt;
use std::io::{self, BufRead, Write};

/// GitHub login entered at the prompt.
#[derive(Clone)]
pub struct GitHubCredentials {
    /// GitHub username.
    pub username: String,

    /// Password or personal access token.
    pub password: String,
}

impl fmt::Debug for GitHubCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Calls `read` until it yields non-blank input.
///
/// The accepted value is returned exactly as `read` produced it.
///
/// # Errors
///
/// Propagates any error returned by `read`.
pub fn prompt_for_input<F>(mut read: F) -> io::Result<String>
where
    F: FnMut() -> io::Result<String>,
{
    loop {
        let input = read()?;
        if !input.trim().is_empty() {
            return Ok(input);
        }
    }
}

/// Prompts for the GitHub username (echoed) and password (hidden).
///
/// # Errors
///
/// Returns an error if the terminal cannot be read or input ends early.
pub fn prompt_for_credentials() -> io::Result<GitHubCredentials> {
    let stdin = io::stdin();
    let username = prompt_for_input(|| {
        read_visible_line(&mut stdin.lock(), "Enter your GitHub username: ")
    })?;
    let password =
        prompt_for_input(|| rpassword::prompt_password("Enter your GitHub password: "))?;

    Ok(GitHubCredentials { username, password })
}

/// Blocks until the operator presses Enter.
///
/// # Errors
///
/// Returns an error if stdin is closed.
pub fn wait_for_enter() -> io::Result<()> {
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Err(end_of_input());
    }
    Ok(())
}

fn read_visible_line(input: &mut impl BufRead, prompt: &str) -> io::Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{prompt}")?;
    stdout.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(end_of_input());
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn end_of_input() -> io::Error {
    io::Error::new(io::ErrorKind::UnexpectedEof, "input ended before a value was entered")
}
