//! External chat CLI invocation

use crate::error::{Result, SitepipeError};
use std::process::Command;
use tracing::debug;

/// Environment variable carrying the chat CLI's auth token
pub const TOKEN_ENV: &str = "COPILOT_GITHUB_TOKEN";

const AUTH_FAILURE_MARKERS: [&str; 4] = [
    "no authentication",
    "authentication information",
    "not authenticated",
    "login",
];

/// Something that turns a request into a completion
pub trait ChatClient {
    /// Name used in logs and error messages
    fn name(&self) -> &str;

    /// Send one request and wait for the full reply
    fn complete(&self, request: &str) -> Result<String>;
}

/// Chat client backed by a CLI program (`copilot -p <request> ...`)
#[derive(Debug, Clone)]
pub struct ChatCli {
    program: String,
    args: Vec<String>,
    token: String,
}

impl ChatCli {
    /// `command` may carry leading arguments, e.g. `"copilot --model x"`;
    /// `args` are appended after the request.
    pub fn new(command: &str, args: Vec<String>, token: String) -> Self {
        let (program, mut leading) = Self::parse_command(command);
        leading.extend(args);
        ChatCli {
            program,
            args: leading,
            token,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Parse command into program and arguments
    fn parse_command(command: &str) -> (String, Vec<String>) {
        let parts: Vec<&str> = command.split_whitespace().collect();

        if parts.is_empty() {
            return (crate::infrastructure::config::DEFAULT_CHAT_PROGRAM.to_string(), vec![]);
        }

        let program = parts[0].to_string();
        let args = parts[1..].iter().map(|s| s.to_string()).collect();

        (program, args)
    }

    fn build_command(&self, request: &str) -> Command {
        // On Windows, use cmd /c so npm-installed .cmd shims are found
        #[cfg(windows)]
        let mut cmd = {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(&self.program);
            cmd
        };

        #[cfg(not(windows))]
        let mut cmd = Command::new(&self.program);

        cmd.arg("-p")
            .arg(request)
            .args(&self.args)
            .env(TOKEN_ENV, &self.token);
        cmd
    }
}

impl ChatClient for ChatCli {
    fn name(&self) -> &str {
        &self.program
    }

    fn complete(&self, request: &str) -> Result<String> {
        debug!(
            program = %self.program,
            request_len = request.len(),
            "invoking chat CLI"
        );

        let output = self.build_command(request).output().map_err(|e| {
            SitepipeError::external(&self.program, format!("failed to launch: {}", e))
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!(
            status = ?output.status.code(),
            stdout_len = stdout.len(),
            stderr_len = stderr.len(),
            "chat CLI finished"
        );

        check_stderr(&self.program, &stderr)?;

        if !output.status.success() {
            let code = output
                .status
                .code()
                .map_or_else(|| "signal".to_string(), |c| c.to_string());
            return Err(SitepipeError::external(
                &self.program,
                format!("exit code {}: {}", code, stderr.trim()),
            ));
        }

        let reply = stdout.trim();
        if reply.is_empty() {
            return Err(SitepipeError::external(&self.program, "returned no output"));
        }

        Ok(reply.to_string())
    }
}

/// Treat authentication complaints and `error:` lines on stderr as failures
fn check_stderr(program: &str, stderr: &str) -> Result<()> {
    let lowered = stderr.to_lowercase();
    if AUTH_FAILURE_MARKERS.iter().any(|m| lowered.contains(m)) {
        return Err(SitepipeError::external(
            program,
            format!("authentication failed: {}", stderr.trim()),
        ));
    }
    if lowered.contains("error:") {
        return Err(SitepipeError::external(program, stderr.trim().to_string()));
    }
    Ok(())
}

/// Short form of a token for debug logs
pub fn redact_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() > 12 {
        let head: String = chars[..8].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        "***".to_string()
    }
}
