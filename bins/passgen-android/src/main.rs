//! Passgen Android CLI
//!
//! Release pipeline tools for the Passgen Android app: signing credential
//! resolution, build configuration checks, Gradle invocation, and artifact
//! reporting.

use anyhow::Result;
use clap::{Parser, Subcommand};
use passgen_android::gradle::BuildType;
use passgen_android::keystore::{self, DEFAULT_PROPERTIES_FILE};
use passgen_android::{abi, gradle, outputs, signing};
use passgen_cli::output::{format_duration, format_size, mask_secret, Status};
use passgen_cli::progress;
use passgen_core::config::Config;
use passgen_core::error::{exit_codes, Error, ErrorCode};
use passgen_core::process::command_exists;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "passgen-android")]
#[command(about = "Release pipeline tools for the Passgen Android app")]
#[command(version)]
struct Cli {
    /// Build settings file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase output verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Signing credential operations
    Signing {
        #[command(subcommand)]
        action: SigningAction,
    },

    /// Build the project via the Gradle wrapper
    Build {
        /// Build configuration: debug, release
        #[arg(long, default_value = "debug")]
        configuration: String,
        /// Clean before building
        #[arg(long)]
        clean: bool,
        /// Build bundle (AAB) instead of APKs
        #[arg(long)]
        bundle: bool,
        /// Properties file with signing credentials
        #[arg(long, default_value = DEFAULT_PROPERTIES_FILE)]
        properties: PathBuf,
    },

    /// Show the APK artifacts the split settings will produce
    Plan {
        /// Build configuration: debug, release
        #[arg(long, default_value = "release")]
        configuration: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List built artifacts with sizes and checksums
    Outputs {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Diagnose environment
    Doctor {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum SigningAction {
    /// Resolve credentials and show where they came from
    Resolve {
        /// Properties file with signing credentials
        #[arg(long, default_value = DEFAULT_PROPERTIES_FILE)]
        properties: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Verify the resolved credentials can sign a release
    Check {
        /// Properties file with signing credentials
        #[arg(long, default_value = DEFAULT_PROPERTIES_FILE)]
        properties: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        owo_colors::set_override(false);
    }

    let config = Config::load(cli.config.as_deref().and_then(|p| p.to_str()))?;

    let exit_code = match cli.command {
        Commands::Signing { action } => match action {
            SigningAction::Resolve { properties, json } => run_signing_resolve(&properties, json),
            SigningAction::Check { properties } => run_signing_check(&properties),
        },
        Commands::Build {
            configuration,
            clean,
            bundle,
            properties,
        } => run_build(
            &config,
            &configuration,
            clean,
            bundle,
            &properties,
            cli.verbose,
            cli.quiet,
        ),
        Commands::Plan {
            configuration,
            json,
        } => run_plan(&config, &configuration, json),
        Commands::Outputs { json } => run_outputs(json),
        Commands::Doctor { json } => run_doctor(json),
    };

    std::process::exit(exit_code);
}

/// Map a structured error onto the CLI exit code space
fn exit_code_for(error: &Error) -> i32 {
    match error.code {
        ErrorCode::ValidationError | ErrorCode::InvalidInput => exit_codes::VALIDATION_ERROR,
        ErrorCode::ConfigError
        | ErrorCode::ConfigParseError
        | ErrorCode::ConfigValidationError
        | ErrorCode::PropertiesError
        | ErrorCode::PropertiesParseError => exit_codes::CONFIG_ERROR,
        ErrorCode::SigningError | ErrorCode::MissingCredential | ErrorCode::KeystoreNotFound => {
            exit_codes::SIGNING_ERROR
        }
        ErrorCode::CommandNotFound => exit_codes::COMMAND_NOT_FOUND,
        _ => exit_codes::FAILURE,
    }
}

fn run_signing_resolve(properties: &Path, json: bool) -> i32 {
    let resolution = match keystore::resolve(properties) {
        Ok(r) => r,
        Err(e) => {
            Status::error(&format!("{}", e));
            return exit_code_for(&e);
        }
    };

    if json {
        match serde_json::to_string_pretty(&resolution.to_report()) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                Status::error(&format!("Failed to serialize report: {}", e));
                return exit_codes::FAILURE;
            }
        }
        return exit_codes::SUCCESS;
    }

    match &resolution.source {
        keystore::CredentialSource::PropertiesFile(path) => {
            Status::info(&format!("Credentials from {}", path.display()));
        }
        keystore::CredentialSource::Environment => {
            Status::info("Credentials from environment variables");
        }
    }

    let creds = &resolution.credentials;
    println!("  keyAlias:      {}", creds.key_alias);
    println!("  keyPassword:   {}", mask_secret(&creds.key_password));
    println!("  storePassword: {}", mask_secret(&creds.store_password));
    println!("  storeFile:     {}", creds.store_file);

    for key in &resolution.unrecognized_keys {
        Status::warning(&format!("Ignoring unrecognized properties key: {}", key));
    }

    if creds.is_complete() {
        Status::success("All signing fields present");
    } else {
        Status::warning("Some signing fields are empty; release builds will fail");
    }

    exit_codes::SUCCESS
}

fn run_signing_check(properties: &Path) -> i32 {
    let resolution = match keystore::resolve(properties) {
        Ok(r) => r,
        Err(e) => {
            Status::error(&format!("{}", e));
            return exit_code_for(&e);
        }
    };

    for key in &resolution.unrecognized_keys {
        Status::warning(&format!("Ignoring unrecognized properties key: {}", key));
    }

    let result = signing::check(&resolution.credentials, Path::new("."));

    for warning in result.warnings() {
        Status::warning(&warning.to_string());
    }

    if result.is_valid() {
        Status::success("Release signing is ready");
        exit_codes::SUCCESS
    } else {
        for error in result.errors() {
            Status::error(&error.to_string());
        }
        exit_codes::SIGNING_ERROR
    }
}

fn run_build(
    config: &Config,
    configuration: &str,
    clean: bool,
    bundle: bool,
    properties: &Path,
    verbose: u8,
    quiet: bool,
) -> i32 {
    let build_type: BuildType = match configuration.parse() {
        Ok(t) => t,
        Err(e) => {
            Status::error(&format!("{}", e));
            return exit_code_for(&e);
        }
    };

    let settings_check = config.settings.validate();
    for warning in settings_check.warnings() {
        Status::warning(&warning.to_string());
    }
    if !settings_check.is_valid() {
        for error in settings_check.errors() {
            Status::error(&error.to_string());
        }
        return exit_codes::CONFIG_ERROR;
    }

    let project_dir = Path::new(".");

    if clean {
        Status::info("Cleaning...");
        if let Err(e) = gradle::clean(project_dir) {
            Status::error(&format!("Clean failed: {}", e));
            return exit_code_for(&e);
        }
    }

    let label = format!(
        "Building {} {}...",
        build_type.name(),
        if bundle { "bundle" } else { "APKs" }
    );
    let spinner = progress::spinner(&label);
    let started = Instant::now();

    let result = match build_type {
        BuildType::Debug => gradle::assemble_debug(project_dir),
        BuildType::Release => {
            let resolution = match keystore::resolve(properties) {
                Ok(r) => r,
                Err(e) => {
                    progress::finish_error(&spinner, "Build aborted");
                    Status::error(&format!("{}", e));
                    return exit_code_for(&e);
                }
            };
            for key in &resolution.unrecognized_keys {
                Status::warning(&format!("Ignoring unrecognized properties key: {}", key));
            }

            if bundle {
                gradle::bundle_release(project_dir, &resolution.credentials)
            } else {
                gradle::assemble_release(project_dir, &resolution.credentials)
            }
        }
    };

    match result {
        Ok(r) if r.success => {
            progress::finish_success(
                &spinner,
                &format!("Build succeeded in {}", format_duration(started.elapsed())),
            );
            if verbose > 0 {
                println!("{}", r.stdout);
            }
            if !quiet {
                list_artifacts(project_dir);
            }
            exit_codes::SUCCESS
        }
        Ok(r) => {
            progress::finish_error(&spinner, "Build failed");
            eprintln!("{}", r.stderr);
            exit_codes::FAILURE
        }
        Err(e) => {
            progress::finish_error(&spinner, "Build failed");
            Status::error(&format!("{}", e));
            exit_code_for(&e)
        }
    }
}

fn list_artifacts(project_dir: &Path) {
    match outputs::discover(project_dir) {
        Ok(artifacts) if artifacts.is_empty() => {}
        Ok(artifacts) => {
            Status::header("Artifacts");
            for artifact in artifacts {
                println!(
                    "  {}  {}  {}",
                    artifact.file_name,
                    format_size(artifact.size),
                    artifact.sha256
                );
            }
        }
        Err(e) => Status::warning(&format!("Artifact discovery failed: {}", e)),
    }
}

fn run_plan(config: &Config, configuration: &str, json: bool) -> i32 {
    let build_type: BuildType = match configuration.parse() {
        Ok(t) => t,
        Err(e) => {
            Status::error(&format!("{}", e));
            return exit_code_for(&e);
        }
    };

    let plan = match abi::split_plan(&config.settings.splits, build_type) {
        Ok(p) => p,
        Err(e) => {
            Status::error(&format!("{}", e));
            return exit_code_for(&e);
        }
    };

    if json {
        match serde_json::to_string_pretty(&plan) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                Status::error(&format!("Failed to serialize plan: {}", e));
                return exit_codes::FAILURE;
            }
        }
        return exit_codes::SUCCESS;
    }

    Status::info(&format!(
        "Expected {} artifacts for {}:",
        build_type.name(),
        if config.settings.splits.enabled {
            "per-ABI splits"
        } else {
            "a single APK"
        }
    ));
    for artifact in &plan {
        match artifact.abi {
            Some(abi) => println!("  {}  ({})", artifact.file_name, abi),
            None => println!("  {}  (universal)", artifact.file_name),
        }
    }

    exit_codes::SUCCESS
}

fn run_outputs(json: bool) -> i32 {
    let artifacts = match outputs::discover(Path::new(".")) {
        Ok(a) => a,
        Err(e) => {
            Status::error(&format!("{}", e));
            return exit_code_for(&e);
        }
    };

    if json {
        match serde_json::to_string_pretty(&artifacts) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                Status::error(&format!("Failed to serialize artifacts: {}", e));
                return exit_codes::FAILURE;
            }
        }
        return exit_codes::SUCCESS;
    }

    if artifacts.is_empty() {
        Status::info("No build artifacts found. Run a build first.");
        return exit_codes::SUCCESS;
    }

    for artifact in artifacts {
        println!(
            "  {}  {}  {}",
            artifact.file_name,
            format_size(artifact.size),
            artifact.sha256
        );
    }

    exit_codes::SUCCESS
}

fn run_doctor(json: bool) -> i32 {
    let project_dir = Path::new(".");
    let checks = [
        ("gradle wrapper", gradle::has_wrapper(project_dir)),
        ("java", command_exists("java")),
        ("keytool", command_exists("keytool")),
        ("adb", command_exists("adb")),
        (
            "key.properties",
            Path::new(DEFAULT_PROPERTIES_FILE).is_file(),
        ),
    ];

    if json {
        let report: serde_json::Map<String, serde_json::Value> = checks
            .iter()
            .map(|(name, ok)| (name.to_string(), serde_json::Value::Bool(*ok)))
            .collect();
        match serde_json::to_string_pretty(&report) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                Status::error(&format!("Failed to serialize report: {}", e));
                return exit_codes::FAILURE;
            }
        }
        return exit_codes::SUCCESS;
    }

    println!("Environment Check");
    println!();

    for (name, ok) in checks {
        if ok {
            Status::success(&format!("{}: found", name));
        } else {
            Status::warning(&format!("{}: not found", name));
        }
    }

    exit_codes::SUCCESS
}
