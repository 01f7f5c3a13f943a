use std::fs;

use anyhow::{Context, Result};
use compsynth::Config;
use tracing::{debug, info};

mod flags {
    use std::path::PathBuf;

    xflags::xflags! {
        /// Generates a bash completion script from a command line description.
        cmd compsynth {
            /// File with the command line description.
            required description: PathBuf
            /// TOML configuration file.
            optional -c, --config config: PathBuf
            /// Where to write the script, stdout by default.
            optional -o, --output output: PathBuf
            /// Overrides the name of the top-level command.
            optional --prog name: String
            /// Logs every generation step.
            optional -v, --verbose
        }
    }
}

fn main() -> Result<()> {
    let flags = flags::Compsynth::from_env_or_exit();

    let default_level = if flags.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let config = match &flags.config {
        Some(path) => Config::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => Config::default(),
    };
    debug!(?config, "configuration");

    let src = fs::read_to_string(&flags.description)
        .with_context(|| format!("reading {}", flags.description.display()))?;
    let mut cmd = compsynth::parse(&src)?;
    if let Some(prog) = flags.prog {
        cmd.prog = prog;
    }

    let script = compsynth::bash::generate_completion(&cmd, &config)?;
    match &flags.output {
        Some(path) => {
            fs::write(path, &script).with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "completion script written");
        }
        None => print!("{script}"),
    }
    Ok(())
}
