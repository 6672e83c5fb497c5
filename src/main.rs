//! gir2dts — generate TypeScript declarations from GObject-Introspection
//! repositories.
//!
//! Two modes:
//!
//! - **stdin mode**: `gir2dts < Gtk-4.0.gir > Gtk.d.ts`
//! - **file mode**: `gir2dts -o types /usr/share/gir-1.0/Gtk-4.0.gir 'vendor/*.gir'`

mod compile;
mod config;
mod discover;
mod emit;
mod error;
mod extract;
mod gir;
mod graph;
mod model;
mod sanitize;
mod types;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "gir2dts",
    about = "Generate TypeScript declaration files from GObject-Introspection repositories"
)]
struct Cli {
    /// Input GIR files, directories or glob patterns. If omitted, reads one
    /// document from stdin and writes declarations to stdout.
    files: Vec<String>,

    /// Output directory for `<Namespace>.d.ts` files
    #[arg(short = 'o', long, env = "GIR2DTS_OUTPUT", default_value = "types")]
    output: PathBuf,

    /// Omit documentation comments; emit one line per declaration
    #[arg(long)]
    no_docs: bool,

    /// Log each written file
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Cli {
    fn options(&self) -> config::Options {
        if self.no_docs {
            config::Options::bare()
        } else {
            config::Options::default()
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.files.is_empty() {
        return stdin_mode(&cli.options());
    }

    file_mode(&cli)
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .try_init();
}

/// stdin mode: compile one document from stdin, print to stdout.
fn stdin_mode(options: &config::Options) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let compiled = compile::compile_document(&input, options).context("failed to compile stdin")?;
    report_warnings(&compiled);
    print!("{}", compiled.text);
    Ok(())
}

/// file mode: compile every discovered file into the output directory.
///
/// A file that fails is reported and skipped; the run fails at the end if
/// any file did.
fn file_mode(cli: &Cli) -> Result<()> {
    let options = cli.options();
    let output_dir = cli.output.as_path();
    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory: {}", output_dir.display()))?;

    let files = discover::discover(&cli.files)?;
    if files.is_empty() {
        anyhow::bail!("no GIR files found");
    }

    let mut failed = 0;
    for file in &files {
        match compile_file(&file.path, output_dir, &options) {
            Ok(out_path) => {
                info!(module = %file.module, "wrote {}", out_path.display());
            }
            Err(e) => {
                failed += 1;
                warn!(module = %file.module, "skipping {}: {:#}", file.path.display(), e);
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} GIR files failed", failed, files.len());
    }
    Ok(())
}

/// Compile a single GIR file and write `<Namespace>.d.ts`.
fn compile_file(path: &Path, output_dir: &Path, options: &config::Options) -> Result<PathBuf> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let compiled = compile::compile_document(&content, options)?;
    report_warnings(&compiled);

    let out_path = output_dir.join(format!("{}.d.ts", compiled.namespace));
    fs::write(&out_path, &compiled.text)
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    info!(namespace = %compiled.namespace, imports = ?compiled.imports, "compiled");
    Ok(out_path)
}

/// Surface non-fatal conditions found while compiling.
fn report_warnings(compiled: &model::Compiled) {
    for warning in &compiled.warnings {
        warn!("{}", warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_docs_flag_disables_documentation() {
        let cli = Cli::parse_from(["gir2dts", "--no-docs", "-o", "out", "a.gir"]);
        assert!(!cli.options().documentation);
        assert_eq!(cli.output, PathBuf::from("out"));
    }

    #[test]
    fn documentation_is_on_by_default() {
        let cli = Cli::parse_from(["gir2dts", "-o", "out"]);
        assert!(cli.options().documentation);
        assert!(cli.files.is_empty());
    }

    #[test]
    fn compile_file_names_output_after_namespace() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("whatever-9.gir");
        fs::write(
            &input,
            r#"<repository xmlns="http://www.gtk.org/introspection/core/1.0">
                 <namespace name="Thing"><function name="go"/></namespace>
               </repository>"#,
        )
        .unwrap();

        let out = compile_file(&input, dir.path(), &config::Options::bare()).unwrap();
        assert_eq!(out, dir.path().join("Thing.d.ts"));
        assert_eq!(fs::read_to_string(out).unwrap(), "export function go(): void;\n");
    }
}
