use clap::Parser;
use h5sh::{H5shError, Shell, ShellBuilder, Theme};
use h5sh_config::{H5shConfig, LogFormat};
use h5sh_core::MemoryStore;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod completer;

/// h5sh - Browse a hierarchical data container like a filesystem
#[derive(Parser, Debug)]
#[command(name = "h5sh", version, about)]
struct Args {
    /// Container snapshot to open (.yaml, .yml or .json)
    datafile: PathBuf,

    /// Disable ANSI colour in prompt, listings and errors
    #[arg(long = "no-colour", visible_alias = "no-color")]
    no_colour: bool,

    /// Configuration file
    #[arg(long, env = "H5SH_CONFIG")]
    config: Option<String>,

    /// Execute ';'-separated commands and exit
    #[arg(short = 'c')]
    command: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let loaded = match &args.config {
        Some(path) => h5sh_config::load_from_file(path),
        None => h5sh_config::load(),
    };
    let config = loaded.unwrap_or_else(|e| {
        eprintln!("h5sh: ignoring configuration: {e}");
        H5shConfig::default()
    });

    init_logging(&config);

    let store = match MemoryStore::from_snapshot_file(&args.datafile) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("h5sh: cannot open '{}': {e}", args.datafile.display());
            std::process::exit(1);
        }
    };
    let file_name = args
        .datafile
        .file_name()
        .map_or_else(|| args.datafile.display().to_string(), |n| n.to_string_lossy().into_owned());
    tracing::info!(file = %args.datafile.display(), objects = store.object_count(), "Opened container");

    let colour = config.shell.colour && !args.no_colour;
    let mut shell = ShellBuilder::new(Arc::new(store))
        .file_name(&file_name)
        .theme(Theme::new(colour))
        .build();

    if let Some(commands) = args.command {
        let code = run_commands(&mut shell, &commands);
        std::process::exit(code);
    }

    let code = run_repl(&mut shell, &config)?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

fn init_logging(config: &H5shConfig) {
    let filter = tracing_subscriber::EnvFilter::new(config.logging.directive());
    let registry = tracing_subscriber::registry().with(filter);

    match config.logging.format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init(),
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(io::stderr),
            )
            .init(),
    }
}

/// Runs `;`-separated commands. Returns 1 if any of them failed.
fn run_commands(shell: &mut Shell, commands: &str) -> i32 {
    let mut stdout = io::stdout().lock();
    let mut status = 0;

    for line in commands.split(';') {
        match shell.execute(line, &mut stdout) {
            Ok(()) => {}
            Err(H5shError::Exit(code)) => return code.max(status),
            Err(e) => {
                let _ = stdout.flush();
                eprintln!("{}", shell.error_message(&e));
                status = 1;
            }
        }
    }
    status
}

fn run_repl(shell: &mut Shell, config: &H5shConfig) -> Result<i32, Box<dyn std::error::Error>> {
    use completer::H5shHelper;
    use rustyline::error::ReadlineError;
    use rustyline::history::DefaultHistory;
    use rustyline::{CompletionType, Config, Editor};

    let history = &config.shell.history;
    let rl_config = Config::builder()
        .completion_type(CompletionType::List)
        .max_history_size(history.max_entries)?
        .history_ignore_dups(true)?
        .history_ignore_space(true)
        .build();

    let cwd = Arc::new(RwLock::new(shell.cwd().clone()));
    let helper = H5shHelper::new(shell.store().clone(), cwd.clone(), shell.command_names());

    let mut rl: Editor<H5shHelper, DefaultHistory> = Editor::with_config(rl_config)?;
    rl.set_helper(Some(helper));

    let history_path = history.resolved_file();
    if history.enabled {
        if let Err(e) = rl.load_history(&history_path) {
            tracing::debug!(path = %history_path.display(), error = %e, "No history loaded");
        }
    }

    println!("h5sh v{} - {}", env!("CARGO_PKG_VERSION"), shell.file_name());
    println!("Type 'help' for help, 'quit' to exit.");
    println!();

    let mut exit_code = 0;
    loop {
        *cwd.write().unwrap_or_else(PoisonError::into_inner) = shell.cwd().clone();
        let prompt = shell.prompt(&config.shell.prompt);

        match rl.readline(&prompt) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());

                let mut stdout = io::stdout().lock();
                match shell.execute(&line, &mut stdout) {
                    Ok(()) => {}
                    Err(H5shError::Exit(code)) => {
                        exit_code = code;
                        break;
                    }
                    Err(e) => {
                        let _ = stdout.flush();
                        eprintln!("{}", shell.error_message(&e));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
            }
            Err(ReadlineError::Eof) => {
                println!();
                break;
            }
            Err(err) => {
                eprintln!("h5sh: {err}");
                exit_code = 1;
                break;
            }
        }
    }

    if history.enabled {
        if let Err(e) = rl.save_history(&history_path) {
            tracing::warn!(path = %history_path.display(), error = %e, "Could not save history");
        }
    }

    Ok(exit_code)
}
