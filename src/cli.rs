//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_candle_adapter::CsvCandleAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_sink_adapter::JsonLineSink;
use crate::domain::config_validation::{
    build_risk_config, validate_analysis_config, TIMEFRAME_KEYS,
};
use crate::domain::engine::SmcEngine;
use crate::domain::error::SmcError;
use crate::ports::candle_port::CandleSource;
use crate::ports::config_port::ConfigPort;
use crate::ports::signal_port::SignalSink;

#[derive(Parser, Debug)]
#[command(name = "smc-signals", about = "Multi-timeframe SMC signal engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a symbol and print the signal as JSON
    Analyze {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        symbol: Option<String>,
        /// Append the result as a JSON line to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show available data range per timeframe
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        symbol: Option<String>,
    },
    /// List symbols present in the data directory
    ListSymbols {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Analyze {
            config,
            symbol,
            output,
        } => run_analyze(&config, symbol.as_deref(), output.as_ref()),
        Command::Validate { config } => run_validate(&config),
        Command::Info { config, symbol } => run_info(&config, symbol.as_deref()),
        Command::ListSymbols { config } => run_list_symbols(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = SmcError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn resolve_symbol(symbol_override: Option<&str>, config: &dyn ConfigPort) -> Option<String> {
    symbol_override
        .map(str::to_string)
        .or_else(|| config.get_string("data", "symbol"))
}

fn data_adapter(config: &dyn ConfigPort) -> Result<CsvCandleAdapter, SmcError> {
    let dir = config
        .get_string("data", "dir")
        .ok_or_else(|| SmcError::ConfigMissing {
            section: "data".to_string(),
            key: "dir".to_string(),
        })?;
    Ok(CsvCandleAdapter::new(PathBuf::from(dir)))
}

fn timeframes(config: &dyn ConfigPort) -> Result<[String; 3], SmcError> {
    let get = |key: &str| {
        config
            .get_string("timeframes", key)
            .ok_or_else(|| SmcError::ConfigMissing {
                section: "timeframes".to_string(),
                key: key.to_string(),
            })
    };
    let [higher, medium, lower] = TIMEFRAME_KEYS;
    Ok([get(higher)?, get(medium)?, get(lower)?])
}

fn run_analyze(
    config_path: &PathBuf,
    symbol_override: Option<&str>,
    output_path: Option<&PathBuf>,
) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_analysis_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let Some(symbol) = resolve_symbol(symbol_override, &adapter) else {
        eprintln!("error: no symbol given and none configured under [data]");
        return ExitCode::from(2);
    };

    match analyze_symbol(&adapter, &symbol) {
        Ok(result) => {
            match serde_json::to_string_pretty(&result) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("error: failed to serialize result: {e}");
                    return ExitCode::from(1);
                }
            }
            if let Some(path) = output_path {
                if let Err(e) = append_result(path, &symbol, &result) {
                    eprintln!("error: {e}");
                    return (&e).into();
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Fetch all three timeframe series and run the engine once.
pub fn analyze_symbol(
    config: &dyn ConfigPort,
    symbol: &str,
) -> Result<crate::domain::signal::SignalResult, SmcError> {
    let source = data_adapter(config)?;
    let [higher, medium, lower] = timeframes(config)?;

    eprintln!("Analyzing {symbol} ({higher}/{medium}/{lower})");
    let htf = source.fetch_candles(symbol, &higher)?;
    let mtf = source.fetch_candles(symbol, &medium)?;
    let ltf = source.fetch_candles(symbol, &lower)?;

    let risk = build_risk_config(config)?;
    let engine = SmcEngine::new(htf, mtf, ltf, risk);
    Ok(engine.analyze())
}

fn append_result(
    path: &PathBuf,
    symbol: &str,
    result: &crate::domain::signal::SignalResult,
) -> Result<(), SmcError> {
    let file = File::options().create(true).append(true).open(path)?;
    let mut sink = JsonLineSink::new(file);
    sink.record(symbol, result)
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    match validate_analysis_config(&adapter) {
        Ok(()) => {
            println!("Config OK: {}", config_path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_info(config_path: &PathBuf, symbol_override: Option<&str>) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let Some(symbol) = resolve_symbol(symbol_override, &adapter) else {
        eprintln!("error: no symbol given and none configured under [data]");
        return ExitCode::from(2);
    };

    let result = (|| -> Result<(), SmcError> {
        let source = data_adapter(&adapter)?;
        let tfs = timeframes(&adapter)?;
        println!("{symbol}:");
        for timeframe in &tfs {
            match source.candle_range(&symbol, timeframe)? {
                Some((first, last, count)) => {
                    println!("  {timeframe}: {count} candles, {first} .. {last}")
                }
                None => println!("  {timeframe}: no data"),
            }
        }
        Ok(())
    })();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_list_symbols(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let result = (|| -> Result<(), SmcError> {
        let source = data_adapter(&adapter)?;
        for symbol in source.list_symbols()? {
            println!("{symbol}");
        }
        Ok(())
    })();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
