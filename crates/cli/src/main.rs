mod cmd;
mod output;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use kiln_lib::consts::DEFAULT_CONFIG;
use kiln_lib::execute::Verbosity;

use crate::cmd::{InstallArgs, SetupArgs};
use crate::output::{OutputFormat, print_error};

/// kiln - build and package manager for C and C++ projects
#[derive(Parser)]
#[command(name = "kiln")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Increase verbosity (-v debug, -vv trace and show command output)
  #[arg(short, long, global = true, action = ArgAction::Count)]
  verbose: u8,

  /// Only show warnings and errors
  #[arg(short, long, global = true, conflicts_with = "verbose")]
  quiet: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Install kiln from a freshly built source tree and build its core packages
  Setup {
    /// Do not write or publish the launcher script
    #[arg(long)]
    local: bool,

    /// Source tree holding the built kiln executable (default: the executable's directory)
    #[arg(long)]
    source_dir: Option<PathBuf>,

    /// Build configuration
    #[arg(long, default_value = DEFAULT_CONFIG)]
    config: String,

    /// Copy the launcher to the global bin directory without sudo
    #[arg(long)]
    no_elevate: bool,
  },

  /// Register include files and artefacts with the install environment
  Install {
    /// Project directory
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Package id
    #[arg(long)]
    id: String,

    /// Register as a library package instead of an executable
    #[arg(long)]
    package: bool,

    /// Include directory relative to the project directory (repeatable)
    #[arg(long)]
    includes: Vec<PathBuf>,

    /// Artefact base name to install from bin/<platform>-<config>
    #[arg(long)]
    artefact: Option<String>,

    /// Build configuration
    #[arg(long, default_value = DEFAULT_CONFIG)]
    config: String,
  },

  /// Build every project below a directory in dependency order
  Build {
    /// Directory to crawl for project.json files
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Build configuration
    #[arg(long, default_value = DEFAULT_CONFIG)]
    config: String,
  },

  /// Show platform, install root and registered packages
  Info {
    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    output: OutputFormat,
  },
}

fn main() {
  let cli = Cli::parse();
  let verbosity = Verbosity::from_flags(cli.verbose, cli.quiet);

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.as_filter()));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let result = match cli.command {
    Commands::Setup {
      local,
      source_dir,
      config,
      no_elevate,
    } => cmd::cmd_setup(SetupArgs {
      local,
      source_dir,
      config,
      elevate: !no_elevate,
      verbosity,
    }),
    Commands::Install {
      path,
      id,
      package,
      includes,
      artefact,
      config,
    } => cmd::cmd_install(InstallArgs {
      path,
      id,
      package,
      includes,
      artefact,
      config,
    }),
    Commands::Build { path, config } => cmd::cmd_build(&path, &config),
    Commands::Info { output } => cmd::cmd_info(output),
  };

  if let Err(e) = result {
    print_error(&format!("{:#}", e));
    std::process::exit(-1);
  }
}
