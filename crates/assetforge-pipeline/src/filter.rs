//! External filter tool invocation.
//!
//! Every transformation is delegated to an external process. In filter
//! mode the input bytes go to stdin and the transformed output is read
//! from stdout. In file mode the command template names `{input}` and
//! `{output}` paths and the process does its own I/O.

use std::path::Path;
use std::process::Stdio;

use assetforge_common_core::{Error, ErrorCode, Result};
use assetforge_config::ToolCommand;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;
use tracing::debug;

/// Maximum output size drained from a tool (64 MB).
const MAX_OUTPUT_SIZE: usize = 64 * 1024 * 1024;

/// Placeholder values substituted into tool argument templates.
#[derive(Debug, Default, Clone)]
pub struct Placeholders<'a> {
    pub input: Option<&'a str>,
    pub output: Option<&'a str>,
    pub browsers: Option<&'a str>,
    pub min: &'a str,
}

impl Placeholders<'_> {
    fn apply(&self, arg: &str) -> String {
        let mut arg = arg.replace("{min}", self.min);
        if let Some(input) = self.input {
            arg = arg.replace("{input}", input);
        }
        if let Some(output) = self.output {
            arg = arg.replace("{output}", output);
        }
        if let Some(browsers) = self.browsers {
            arg = arg.replace("{browsers}", browsers);
        }
        arg
    }
}

/// Render the argument list for one invocation. `dev_args` are appended
/// only outside production builds.
fn render_args(tool: &ToolCommand, production: bool, vars: &Placeholders<'_>) -> Vec<String> {
    let mut args: Vec<String> = tool.args.iter().map(|a| vars.apply(a)).collect();
    if !production {
        args.extend(tool.dev_args.iter().map(|a| vars.apply(a)));
    }
    args
}

/// Pipe `input` through the tool and return its stdout.
pub async fn run_filter(
    tool: &ToolCommand,
    name: &str,
    input: &[u8],
    production: bool,
    vars: &Placeholders<'_>,
) -> Result<Vec<u8>> {
    let args = render_args(tool, production, vars);
    debug!(tool = name, program = %tool.program, ?args, "running filter");

    let mut cmd = Command::new(&tool.program);
    cmd.args(&args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = cmd.spawn().map_err(|e| spawn_error(name, &tool.program, e))?;

    let mut stdin = child.stdin.take();
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let input = input.to_vec();
    let write_future = async move {
        if let Some(stdin) = stdin.as_mut() {
            stdin.write_all(&input).await?;
            stdin.shutdown().await?;
        }
        drop(stdin);
        Ok::<_, std::io::Error>(())
    };

    let (write_result, output_result) = tokio::join!(write_future, read_output(stdout, stderr));
    write_result?;
    let (stdout_content, stderr_content) = output_result?;

    let status = child.wait().await?;
    if !status.success() {
        return Err(Error::tool_failed(
            name,
            format!("exited with status {}", status.code().unwrap_or(-1)),
            Some(String::from_utf8_lossy(&stderr_content).into_owned()),
        ));
    }

    Ok(stdout_content)
}

/// Run the tool in file-to-file mode with `{input}`/`{output}` paths.
pub async fn run_file(
    tool: &ToolCommand,
    name: &str,
    input: &Path,
    output: &Path,
    production: bool,
) -> Result<()> {
    let input_str = input.to_string_lossy();
    let output_str = output.to_string_lossy();
    let vars = Placeholders {
        input: Some(&input_str),
        output: Some(&output_str),
        ..Placeholders::default()
    };
    let args = render_args(tool, production, &vars);
    debug!(tool = name, program = %tool.program, ?args, "running file tool");

    if let Some(parent) = output.parent() {
        assetforge_common_fs::ensure_dir(parent)?;
    }

    let mut cmd = Command::new(&tool.program);
    cmd.args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = cmd.spawn().map_err(|e| spawn_error(name, &tool.program, e))?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let (_, stderr_content) = read_output(stdout, stderr).await?;

    let status = child.wait().await?;
    if !status.success() {
        return Err(Error::tool_failed(
            name,
            format!("exited with status {}", status.code().unwrap_or(-1)),
            Some(String::from_utf8_lossy(&stderr_content).into_owned()),
        ));
    }

    Ok(())
}

fn spawn_error(name: &str, program: &str, e: std::io::Error) -> Error {
    if e.kind() == std::io::ErrorKind::NotFound {
        Error::Tool {
            code: ErrorCode::TOOL_NOT_FOUND,
            tool: name.to_string(),
            message: format!("program not found: {program}"),
            stderr: None,
        }
    } else {
        Error::Io(e)
    }
}

/// Read stdout and stderr concurrently.
async fn read_output(
    stdout: Option<tokio::process::ChildStdout>,
    stderr: Option<tokio::process::ChildStderr>,
) -> Result<(Vec<u8>, Vec<u8>)> {
    let stdout_future = async {
        let mut content = Vec::new();
        if let Some(stdout) = stdout {
            stdout
                .take(MAX_OUTPUT_SIZE as u64)
                .read_to_end(&mut content)
                .await?;
        }
        Ok::<_, std::io::Error>(content)
    };

    let stderr_future = async {
        let mut content = Vec::new();
        if let Some(stderr) = stderr {
            stderr
                .take(MAX_OUTPUT_SIZE as u64)
                .read_to_end(&mut content)
                .await?;
        }
        Ok::<_, std::io::Error>(content)
    };

    let (stdout_result, stderr_result) = tokio::join!(stdout_future, stderr_future);

    Ok((stdout_result?, stderr_result?))
}
