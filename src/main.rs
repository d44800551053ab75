use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::prelude::*;

use projconf::{ConfigRegistry, ConfigValue, ProjectConfig};

#[derive(Parser)]
#[command(name = "projconf")]
#[command(
	author,
	version,
	about = "Resolve build-project configuration files into per-environment options"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Project configuration file
	#[arg(short = 'c', long, value_name = "FILE", default_value = "platformio.ini")]
	project_conf: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
	/// List declared environments
	Envs,
	/// Display resolved options of one environment, or of every section
	Show {
		/// Environment to display
		#[arg(short, long)]
		environment: Option<String>,
	},
	/// Print one resolved option value
	Get { section: String, option: String },
	/// Print every section's resolved options as JSON
	Json,
	/// Check environments and option names, migrating legacy options
	Validate {
		/// Environments that must be declared
		#[arg(short, long = "environment")]
		environments: Vec<String>,
	},
}

fn main() -> ExitCode {
	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| "projconf=warn".into()),
		)
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
		.init();

	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();

	let mut registry = ConfigRegistry::new();
	let config = registry.get_instance(&cli.project_conf).with_context(|| {
		format!(
			"Failed to load project configuration {}",
			cli.project_conf.display()
		)
	})?;

	match cli.command {
		Commands::Envs => handle_envs(config),
		Commands::Show { environment } => handle_show(config, environment.as_deref()),
		Commands::Get { section, option } => handle_get(config, &section, &option),
		Commands::Json => handle_json(config),
		Commands::Validate { environments } => handle_validate(config, &environments),
	}
}

fn handle_envs(config: &ProjectConfig) -> Result<ExitCode> {
	let defaults = config.default_envs()?;
	for env in config.envs() {
		if defaults.contains(&env) {
			println!("{} (default)", env);
		} else {
			println!("{}", env);
		}
	}
	Ok(ExitCode::SUCCESS)
}

fn handle_show(config: &ProjectConfig, environment: Option<&str>) -> Result<ExitCode> {
	let sections: Vec<String> = match environment {
		Some(env) => vec![format!("env:{}", env)],
		None => config.sections().map(String::from).collect(),
	};

	for section in &sections {
		let items = config
			.items(section)
			.with_context(|| format!("Failed to resolve section [{}]", section))?;
		println!("[{}]", section);
		for (option, value) in &items {
			match value {
				Some(value) => println!("{} = {}", option, value),
				None => println!("{} =", option),
			}
		}
		println!();
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_get(config: &ProjectConfig, section: &str, option: &str) -> Result<ExitCode> {
	let value = config
		.get(section, option)
		.with_context(|| format!("Failed to resolve {}.{}", section, option))?
		.ok_or_else(|| anyhow::anyhow!("Option '{}' not found in section [{}]", option, section))?;

	match value {
		ConfigValue::Single(value) => println!("{}", value),
		ConfigValue::Multiple(values) => {
			for value in values {
				println!("{}", value);
			}
		}
	}
	Ok(ExitCode::SUCCESS)
}

fn handle_json(config: &ProjectConfig) -> Result<ExitCode> {
	println!("{}", config.to_json()?);
	Ok(ExitCode::SUCCESS)
}

fn handle_validate(config: &mut ProjectConfig, environments: &[String]) -> Result<ExitCode> {
	let warnings = config
		.validate(environments, true)
		.context("Project configuration is invalid")?;

	for warning in &warnings {
		eprintln!("Warning! {}", warning);
	}

	println!(
		"Project configuration is valid: {}",
		config.path().display()
	);
	Ok(ExitCode::SUCCESS)
}
