//! Formatting of Kotlin sources with ktlint's `--format` mode.
//!
//! The sources are copied into a scratch directory, formatted there in a
//! single ktlint run and only copied to the output directory once ktlint
//! succeeded. The output directory may be the input directory itself.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use globset::{Glob, GlobSet, GlobSetBuilder};
use log::{debug, info};
use semver::Version;
use walkdir::WalkDir;

use crate::classpath::{join_classpath, Platform};
use crate::error::{Error, Result};
use crate::ktlint::{self, LintOptions};

const KOTLIN_FILE_PATTERNS: [&str; 2] = ["**/*.kt", "**/*.kts"];

/// A `java` command line: classpath, main class, arguments and standard input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaInvocation {
    pub classpath: String,
    pub main_class: String,
    pub args: Vec<String>,
    pub stdin: Vec<u8>,
}

/// Runs a Java program to completion.
pub trait JavaLauncher {
    fn launch(&self, invocation: &JavaInvocation) -> Result<()>;
}

/// Launches the `java` executable found on `PATH`.
///
/// ktlint's standard output is redirected to standard error, so that the
/// report never mixes with output meant for pipes.
#[derive(Debug, Default)]
pub struct ProcessLauncher;

impl JavaLauncher for ProcessLauncher {
    fn launch(&self, invocation: &JavaInvocation) -> Result<()> {
        debug!(
            "Running java -classpath {} {} {:?}",
            invocation.classpath, invocation.main_class, invocation.args
        );

        let mut child = Command::new("java")
            .arg("-classpath")
            .arg(&invocation.classpath)
            .arg(&invocation.main_class)
            .args(&invocation.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::from(io::stderr()))
            .spawn()
            .map_err(|e| Error::FormatError(format!("Could not launch java: {e}")))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(&invocation.stdin).map_err(Error::IoError)?;
        }

        let status = child.wait().map_err(Error::IoError)?;
        if !status.success() {
            return Err(Error::FormatError(format!("ktlint failed ({status})")));
        }

        Ok(())
    }
}

/// Everything a formatting run needs.
#[derive(Debug, Clone)]
pub struct FormatRequest<'a> {
    pub ktlint_version: &'a Version,
    pub options: &'a LintOptions,
    pub classpath: &'a [PathBuf],
    pub main_class: &'a str,
    pub platform: Platform,
    pub input_dir: &'a Path,
    /// Where formatted files are written; usually the same as `input_dir`
    pub output_dir: &'a Path,
}

/// ktlint arguments of a formatting run; file paths are read NUL-separated from stdin.
pub fn format_args(version: &Version, options: &LintOptions) -> Result<Vec<String>> {
    let mut args = ktlint::cli_args(version, options)?;
    args.push("--patterns-from-stdin=".to_string());
    args.push("--format".to_string());
    Ok(args)
}

fn kotlin_file_globs() -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in KOTLIN_FILE_PATTERNS {
        builder.add(Glob::new(pattern).map_err(|e| Error::Internal(e.to_string()))?);
    }
    builder.build().map_err(|e| Error::Internal(e.to_string()))
}

/// Lists the Kotlin source files below `input_dir`, relative to it and sorted.
pub fn find_kotlin_files(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let globs = kotlin_file_globs()?;
    let mut files = Vec::new();

    for entry in WalkDir::new(input_dir).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::IoError(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative_path = entry
            .path()
            .strip_prefix(input_dir)
            .map_err(|e| Error::Internal(e.to_string()))?;

        if globs.is_match(relative_path) {
            files.push(relative_path.to_path_buf());
        }
    }

    Ok(files)
}

fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).map_err(Error::IoError)?;
    }
    fs::copy(from, to).map_err(Error::IoError)?;
    Ok(())
}

/// Formats every Kotlin file of `request.input_dir` and writes the results to
/// `request.output_dir`, keeping the relative paths.
///
/// Returns the number of formatted files; without Kotlin files ktlint is not launched.
///
/// # Errors
/// * `Error::ConfigError` if the input directory does not exist or the options
///   are not valid for the ktlint version
/// * `Error::FormatError` if ktlint cannot be launched or fails; the output
///   directory is left untouched in that case
pub fn format_files(request: &FormatRequest, launcher: &dyn JavaLauncher) -> Result<usize> {
    if !request.input_dir.is_dir() {
        return Err(Error::ConfigError(format!(
            "Input directory {} does not exist",
            request.input_dir.display()
        )));
    }

    let args = format_args(request.ktlint_version, request.options)?;

    let files = find_kotlin_files(request.input_dir)?;
    if files.is_empty() {
        info!("No Kotlin files found in {}", request.input_dir.display());
        return Ok(0);
    }

    if request.classpath.is_empty() {
        return Err(Error::Internal("Resolved ktlint classpath is empty".to_string()));
    }

    let intermediate_dir = tempfile::Builder::new()
        .prefix("ktlint-format")
        .tempdir()
        .map_err(Error::IoError)?;
    debug!(
        "Copying {} file(s) to {}",
        files.len(),
        intermediate_dir.path().display()
    );

    let mut intermediate_paths = Vec::with_capacity(files.len());
    for relative_path in &files {
        let intermediate_path = intermediate_dir.path().join(relative_path);
        copy_file(&request.input_dir.join(relative_path), &intermediate_path)?;
        intermediate_paths.push(intermediate_path.display().to_string());
    }

    launcher.launch(&JavaInvocation {
        classpath: join_classpath(request.classpath, request.platform),
        main_class: request.main_class.to_string(),
        args,
        stdin: intermediate_paths.join("\0").into_bytes(),
    })?;

    for relative_path in &files {
        copy_file(
            &intermediate_dir.path().join(relative_path),
            &request.output_dir.join(relative_path),
        )?;
    }

    info!(
        "Formatted {} Kotlin file(s) into {}",
        files.len(),
        request.output_dir.display()
    );
    Ok(files.len())
}
