//! ktlint-hook's main application entry point.
//! Parses arguments, loads the configuration and installs (or prints) the hook,
//! or formats a directory of Kotlin sources.

use std::path::{Path, PathBuf};

use ktlint_hook::{
    classpath::{read_main_class, ClasspathResolver, ExplicitClasspath, Platform},
    cli::{get_args, Args, Command},
    config::{find_config_file, get_config, Configuration},
    constants::{CONFIG_FILES, PRE_COMMIT_TEMPLATE},
    error::{default_error_handler, Error, Result},
    format::{format_files, FormatRequest, ProcessLauncher},
    git::pre_commit_hook_path,
    hook::{ensure_overwritable, install_hook, render_hook_script, HookParameters},
    ktlint::Coordinates,
    logger::init_logger,
    prompt::DialoguerPrompter,
};
use log::info;

/// Main application entry point.
fn main() {
    let args = get_args();

    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads the configuration file (if any) and merges command line overrides
/// 2. Selects the ktlint coordinates for the configured version
/// 3. Resolves the classpath and its main class
/// 4. Installs the hook, or formats the requested directory
fn run(args: Args) -> Result<()> {
    let working_dir = std::env::current_dir().map_err(Error::IoError)?;

    let config_file = args
        .config
        .clone()
        .or_else(|| find_config_file(&working_dir, &CONFIG_FILES));
    let config = get_config(config_file.as_deref(), args.overrides())?;

    let coordinates = Coordinates::for_version(&config.ktlint_version);
    info!("Using ktlint {coordinates}");

    if args.print_coordinates {
        println!("{coordinates}");
        return Ok(());
    }

    let classpath = ExplicitClasspath::new(config.classpath.clone()).resolve(&coordinates)?;
    let main_class = match &config.main_class {
        Some(main_class) => main_class.clone(),
        None => read_main_class(&classpath)?,
    };

    match &args.command {
        Some(Command::Format {
            input_dir,
            output_dir,
        }) => {
            let input_dir = working_dir.join(input_dir);
            let output_dir = output_dir
                .as_ref()
                .map_or_else(|| input_dir.clone(), |dir| working_dir.join(dir));

            let request = FormatRequest {
                ktlint_version: &config.ktlint_version,
                options: &config.options,
                classpath: &classpath,
                main_class: &main_class,
                platform: Platform::current(),
                input_dir: &input_dir,
                output_dir: &output_dir,
            };
            let count = format_files(&request, &ProcessLauncher)?;

            println!("Formatted {count} Kotlin file(s): '{}'", output_dir.display());
            Ok(())
        }
        None => install(&args, &working_dir, &config, &classpath, &main_class),
    }
}

fn install(
    args: &Args,
    working_dir: &Path,
    config: &Configuration,
    classpath: &[PathBuf],
    main_class: &str,
) -> Result<()> {
    let installation_command = args.reinstall_command(working_dir);

    let params = HookParameters {
        ktlint_version: &config.ktlint_version,
        options: &config.options,
        classpath,
        main_class,
        installation_command: &installation_command,
        platform: Platform::current(),
    };
    let script = render_hook_script(&params, PRE_COMMIT_TEMPLATE)?;

    if args.dry_run {
        print!("{script}");
        return Ok(());
    }

    let git_dir = std::env::var_os("GIT_DIR")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from);
    let hook_path = pre_commit_hook_path(working_dir, git_dir.as_deref())?;

    let prompt = DialoguerPrompter::new();
    ensure_overwritable(&prompt, &hook_path, args.force)?;
    install_hook(&hook_path, &script)?;

    println!("Installed ktlint pre-commit hook: '{}'", hook_path.display());
    Ok(())
}
