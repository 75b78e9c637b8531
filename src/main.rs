#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "resdoc", about = "Compiled game resource inspection tools")]
struct Cli {
	/// Log parser progress to stderr (repeat for more detail).
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	verbose: u8,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Header, block directory and inferred type.
	Info(cmd::info::Args),
	/// Introspection manifest summary or one struct layout.
	Manifest(cmd::manifest::Args),
	/// Decode the payload through the manifest.
	Decode(cmd::decode::Args),
	/// Edit info dependencies.
	Deps(cmd::deps::Args),
	/// External resource references.
	Refs(cmd::refs::Args),
	/// Vertex and index buffer metadata.
	Buffers(cmd::buffers::Args),
	/// Raw bytes of one block.
	Block(cmd::block::Args),
}

fn main() {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	if let Err(err) = run(cli.command) {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn init_tracing(verbose: u8) {
	let filter = match verbose {
		0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
		1 => EnvFilter::new("resdoc=debug"),
		_ => EnvFilter::new("resdoc=trace"),
	};
	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn run(command: Commands) -> resdoc::resource::Result<()> {
	match command {
		Commands::Info(args) => cmd::info::run(args),
		Commands::Manifest(args) => cmd::manifest::run(args),
		Commands::Decode(args) => cmd::decode::run(args),
		Commands::Deps(args) => cmd::deps::run(args),
		Commands::Refs(args) => cmd::refs::run(args),
		Commands::Buffers(args) => cmd::buffers::run(args),
		Commands::Block(args) => cmd::block::run(args),
	}
}
