//! `idc-recommend` command line tool.
//!
//! Reads a recommendation request as JSON, runs the search and writes the
//! Pareto list as JSON.

use std::{
    fs::File,
    io::{self, BufReader, BufWriter, StdoutLock, Write as _},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::Context;
use clap::Parser;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use idc_recommend::{recommend, AlgorithmInput, AlgorithmOutput, InputError, Nsga2Config};

const EXIT_RUNTIME: u8 = 1;
const EXIT_MALFORMED: u8 = 3;
const EXIT_INVALID: u8 = 4;

/// Recommend IDC sets trading latency coverage against price
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input JSON file (stdin when omitted)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Output JSON file (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Random seed; drawn from the OS when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Number of generations (search default when omitted)
    #[arg(long)]
    generations: Option<usize>,

    /// Population size (search default when omitted)
    #[arg(long)]
    population_size: Option<usize>,

    /// Offspring per generation (search default when omitted)
    #[arg(long)]
    offspring: Option<usize>,

    /// Evaluate offspring on the current thread only
    #[arg(long)]
    no_parallel: bool,

    /// Pretty-print the output JSON
    #[arg(long)]
    pretty: bool,
}

impl Args {
    fn search_config(&self) -> Nsga2Config {
        let mut config = Nsga2Config::default().with_parallel(!self.no_parallel);
        if let Some(n) = self.generations {
            config = config.with_max_generations(n);
        }
        if let Some(n) = self.population_size {
            config = config.with_population_size(n);
        }
        if let Some(n) = self.offspring {
            config = config.with_offspring_size(n);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}

#[derive(Debug)]
enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => {
                let file = File::create(&path).with_context(|| {
                    format!("Failed to create output file: {}", path.display())
                })?;
                Ok(Output::File {
                    writer: BufWriter::new(file),
                    path,
                })
            }
            None => Ok(Output::Stdout {
                writer: io::stdout().lock(),
            }),
        }
    }

    fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    fn write_json(&mut self, value: &AlgorithmOutput, pretty: bool) -> anyhow::Result<()> {
        let written = if pretty {
            serde_json::to_writer_pretty(&mut *self, value)
        } else {
            serde_json::to_writer(&mut *self, value)
        };
        written.with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

fn read_input(path: Option<&PathBuf>) -> anyhow::Result<AlgorithmInput> {
    let input = match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file: {}", path.display()))?;
            AlgorithmInput::from_reader(BufReader::new(file))
                .with_context(|| format!("Failed to read input from {}", path.display()))?
        }
        None => AlgorithmInput::from_reader(io::stdin().lock())
            .context("Failed to read input from stdin")?,
    };
    Ok(input)
}

fn run(args: &Args) -> anyhow::Result<()> {
    let input = read_input(args.input.as_ref())?;
    let output = recommend(&input, &args.search_config())?;
    Output::from_output_path(args.output.clone())?.write_json(&output, args.pretty)
}

fn exit_code(err: &anyhow::Error) -> u8 {
    match err.chain().find_map(|e| e.downcast_ref::<InputError>()) {
        Some(input) if input.is_malformed() => EXIT_MALFORMED,
        Some(_) => EXIT_INVALID,
        None => EXIT_RUNTIME,
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use idc_recommend::RecommendError;

    #[test]
    fn test_exit_code_malformed() {
        let err = AlgorithmInput::from_json_str("{").unwrap_err();
        let err = anyhow::Error::new(err).context("Failed to read input from stdin");
        assert_eq!(exit_code(&err), EXIT_MALFORMED);
    }

    #[test]
    fn test_exit_code_validation() {
        let err: RecommendError = InputError::EmptyIdcList.into();
        assert_eq!(exit_code(&anyhow::Error::new(err)), EXIT_INVALID);

        let err = AlgorithmInput::from_json_str("{}").unwrap_err();
        assert_eq!(exit_code(&anyhow::Error::new(err)), EXIT_INVALID);
    }

    #[test]
    fn test_exit_code_runtime() {
        let err: RecommendError =
            idc_recommend::nsga2::InvalidConfig("offspring_size must be at least 1".into()).into();
        assert_eq!(exit_code(&anyhow::Error::new(err)), EXIT_RUNTIME);
    }

    #[test]
    fn test_args_to_config() {
        let args = Args::parse_from([
            "idc-recommend",
            "--seed",
            "9",
            "--generations",
            "5",
            "--no-parallel",
        ]);
        let config = args.search_config();
        let defaults = Nsga2Config::default();
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.max_generations, 5);
        assert_eq!(config.population_size, defaults.population_size);
        assert_eq!(config.offspring_size, defaults.offspring_size);
        assert!(!config.parallel);
    }

    #[test]
    fn test_omitted_flags_keep_config_defaults() {
        let config = Args::parse_from(["idc-recommend"]).search_config();
        let defaults = Nsga2Config::default();
        assert_eq!(config.max_generations, defaults.max_generations);
        assert_eq!(config.population_size, defaults.population_size);
        assert_eq!(config.offspring_size, defaults.offspring_size);
        assert_eq!(config.parallel, defaults.parallel);
        assert_eq!(config.seed, None);
    }
}
