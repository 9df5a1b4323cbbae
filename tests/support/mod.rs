use anyhow::{Context, Result, bail};
use jsonschema::JSONSchema;
use productos::{Config, Console, Shell, ShellError};
use serde_json::Value;
use std::fs::File;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::sync::OnceLock;

pub fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Outcome of a scripted in-process session.
pub struct Session {
    pub products: Vec<productos::Product>,
    pub stdout: String,
    pub result: Result<(), ShellError>,
}

/// Open the data file at `path` and feed `lines` to the menu, one per prompt.
pub fn run_session(path: &Path, lines: &[&str]) -> Result<Session> {
    let mut script = lines.join("\n");
    script.push('\n');
    let console = Console::new(Cursor::new(script), Vec::new());
    let mut shell = Shell::open(Config::with_data_path(path), console)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let result = shell.run();
    let (products, out) = shell.into_parts();
    Ok(Session {
        products,
        stdout: String::from_utf8(out).context("session output is not UTF-8")?,
        result,
    })
}

/// Run the compiled binary against `data_path`, piping `lines` to stdin.
pub fn run_binary(data_path: &Path, lines: &[&str]) -> Result<Output> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_productos"))
        .arg(data_path)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .context("failed to spawn productos")?;
    {
        let mut stdin = child.stdin.take().context("stdin not captured")?;
        for line in lines {
            // The child may exit before reading its input (e.g. fatal open error).
            match writeln!(stdin, "{line}") {
                Err(err) if err.kind() == std::io::ErrorKind::BrokenPipe => break,
                other => other?,
            }
        }
    }
    child
        .wait_with_output()
        .context("failed to wait for productos")
}

/// Check a saved data file against `schema/productos.schema.json`.
pub fn validate_data_file(path: &Path) -> Result<()> {
    static SCHEMA: OnceLock<Value> = OnceLock::new();
    let schema = if let Some(existing) = SCHEMA.get() {
        existing
    } else {
        let schema_path = repo_root().join("schema/productos.schema.json");
        let loaded: Value = serde_json::from_reader(File::open(&schema_path)?)?;
        SCHEMA.get_or_init(move || loaded)
    };
    let value: Value = serde_json::from_reader(File::open(path)?)?;

    let compiled = JSONSchema::compile(schema)?;
    if let Err(errors) = compiled.validate(&value) {
        let details = errors
            .map(|err| err.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        bail!("{} failed schema validation:\n{details}", path.display());
    }
    Ok(())
}
