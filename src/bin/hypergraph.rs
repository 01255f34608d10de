use std::{env, io, process};

use hypergraphdb::{
    HypergraphError, HypergraphStore, Table, TableName, client::CommandLineConfig,
    safety::run_safety_checks,
};
use serde_json::json;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        println!("{}", CommandLineConfig::help());
        return;
    }
    let arg_refs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
    let config = match CommandLineConfig::from_args(&arg_refs) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("error: {err}");
            eprint!("{}", CommandLineConfig::help());
            process::exit(2);
        }
    };

    let filter = if config.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    process::exit(run(&config));
}

/// Opens the store, runs the command and closes the store on every path.
fn run(config: &CommandLineConfig) -> i32 {
    let store = match HypergraphStore::open(&config.database) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("{err}");
            return 2;
        }
    };
    let outcome = run_command(&store, config);
    let closed = store.close();
    let code = match outcome {
        Ok(code) => code,
        Err(err) => {
            eprintln!("command failed: {err}");
            1
        }
    };
    match closed {
        Ok(()) => code,
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

fn run_command(
    store: &HypergraphStore,
    config: &CommandLineConfig,
) -> Result<i32, HypergraphError> {
    match config.command.as_str() {
        "init" => {
            store.initialize()?;
            println!("initialized {}", config.database);
            Ok(0)
        }
        "status" => {
            let graph = store.load()?;
            for (table, rows) in graph.tables() {
                println!("{table}={}", rows.len());
            }
            println!("total={}", graph.record_count());
            Ok(0)
        }
        "audit" => {
            let report = store.view(run_safety_checks)?;
            let text = serde_json::to_string(&report)
                .map_err(|e| HypergraphError::invalid_input(e.to_string()))?;
            println!("{text}");
            Ok(if report.has_issues() { 1 } else { 0 })
        }
        "dump" => {
            let table: TableName = config.command_args[0].parse()?;
            let graph = store.load()?;
            print_rows(graph.table(table))?;
            Ok(0)
        }
        "select" => {
            let table: TableName = config.command_args[0].parse()?;
            let predicate = &config.command_args[1];
            let rows = store.view(|graph| graph.query().select_where(table, predicate))?;
            print_rows(&rows)?;
            Ok(0)
        }
        other => Err(HypergraphError::invalid_input(format!("unknown command {other}"))),
    }
}

fn print_rows(rows: &Table) -> Result<(), HypergraphError> {
    for (key, record) in rows {
        let line = serde_json::to_string(&json!({ "key": key, "record": record }))
            .map_err(|e| HypergraphError::invalid_input(e.to_string()))?;
        println!("{line}");
    }
    Ok(())
}
