//! openfeature-codegen's entry point.
//! Parses the command line, merges it with the configuration file and hands
//! the resulting requests to the processor.

use std::path::Path;

use openfeature_codegen::{
    cli::{get_args, Args, Command, GenerateArgs, InitArgs},
    config::{load_config, Config},
    error::{default_error_handler, Result},
    logger::init_logger,
    manifest::init_manifest,
    processor::{Processor, Request},
    renderer::MiniJinjaRenderer,
    storage::FileSystemStorage,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    match run(args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => default_error_handler(err),
    }
}

/// Runs the selected command. Returns `Ok(false)` when some targets of a
/// batch failed; their errors have already been printed.
fn run(args: Args) -> Result<bool> {
    let storage = FileSystemStorage::new();
    let config = load_config(&storage, Path::new("."), args.config.as_deref())?;

    match args.command {
        Command::Generate(generate) => run_generate(&storage, &config, &generate),
        Command::Init(init) => run_init(&storage, &config, &init),
    }
}

fn run_generate(storage: &FileSystemStorage, config: &Config, args: &GenerateArgs) -> Result<bool> {
    let renderer = MiniJinjaRenderer::new();
    let processor = Processor::new(storage, &renderer);
    let manifest_path = config.manifest_path(args.manifest.as_deref());
    let overrides = args.overrides();

    let mut targets = args.targets.clone();
    let mut seen = std::collections::HashSet::new();
    targets.retain(|target| seen.insert(*target));
    let requests: Vec<Request> = targets
        .into_iter()
        .map(|target| Request::new(target, config.target_config(target, &overrides)))
        .collect();

    let mut succeeded = true;
    for outcome in processor.generate_all(&manifest_path, &requests)? {
        match outcome.result {
            Ok(path) => println!("{}: '{}'", outcome.target, path.display()),
            Err(err) => {
                eprintln!("{err}");
                succeeded = false;
            }
        }
    }
    Ok(succeeded)
}

fn run_init(storage: &FileSystemStorage, config: &Config, args: &InitArgs) -> Result<bool> {
    let manifest_path = config.manifest_path(args.manifest.as_deref());
    init_manifest(storage, &manifest_path, args.force)?;
    println!("Created manifest '{}'.", manifest_path.display());
    Ok(true)
}
