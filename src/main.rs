#![allow(missing_docs)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser)]
#[command(name = "geodoc", about = "Houdini .geo inspection tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	Info {
		path: PathBuf,
		#[arg(long)]
		mixed: bool,
		#[arg(long)]
		json: bool,
	},
	Positions {
		path: PathBuf,
		#[arg(long)]
		limit: Option<usize>,
	},
	Topology {
		path: PathBuf,
		#[arg(long)]
		limit: Option<usize>,
	},
	Split {
		path: PathBuf,
	},
	Write {
		path: PathBuf,
		#[arg(long)]
		mixed: bool,
		#[arg(long)]
		out: Option<PathBuf>,
	},
}

fn main() {
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> geodoc::geo::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Info { path, mixed, json } => cmd::info::run(path, mixed, json),
		Commands::Positions { path, limit } => cmd::positions::run(path, limit),
		Commands::Topology { path, limit } => cmd::topology::run(path, limit),
		Commands::Split { path } => cmd::split::run(path),
		Commands::Write { path, mixed, out } => cmd::write::run(path, mixed, out),
	}
}
