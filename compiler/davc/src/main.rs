//! DAV command-line runner.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use dav_eval::{AssignPolicy, Diagnostic};
use dav_vocab::Locale;
use davc::repl::{Reply, Session};
use davc::{init_tracing, print_tree, read_script, run, RunConfig, RunError};

/// What the command line asked for.
struct Options {
    config: RunConfig,
    file: Option<PathBuf>,
    print_tree: bool,
    dump_vocab: bool,
}

fn main() -> ExitCode {
    init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(Some(options)) => options,
        Ok(None) => return ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!();
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    let result = if options.dump_vocab {
        dump_vocab(&options.config)
    } else {
        match &options.file {
            Some(path) if options.print_tree => tree_file(path, &options.config),
            Some(path) => run_file(path, &options.config),
            None => repl(&options.config),
        }
    };
    match result {
        Ok(code) => code,
        Err(err) => {
            // A fatal run error is already the last diagnostic.
            match &err {
                RunError::RecursionLimit { report, .. } => emit(&report.diagnostics),
                _ => eprintln!("{err}"),
            }
            ExitCode::FAILURE
        }
    }
}

/// `Ok(None)` when the arguments were fully handled (help, version).
fn parse_args(args: &[String]) -> Result<Option<Options>, String> {
    let mut options = Options {
        config: RunConfig::default(),
        file: None,
        print_tree: false,
        dump_vocab: false,
    };
    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        // `--flag=value` and `--flag value` are both accepted.
        let (flag, mut inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag, Some(value.to_string())),
            _ => (arg, None),
        };
        let mut value = |name: &str| -> Result<String, String> {
            if let Some(value) = inline.take() {
                return Ok(value);
            }
            i += 1;
            args.get(i)
                .cloned()
                .ok_or_else(|| format!("missing value for {name}"))
        };
        match flag {
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            "--version" | "-V" => {
                println!("DAV {}", env!("CARGO_PKG_VERSION"));
                return Ok(None);
            }
            "--lang" => {
                let code = value("--lang")?;
                options.config.locale = code.parse::<Locale>().map_err(|e| e.to_string())?;
            }
            "--vocab" => options.config.vocab_path = Some(PathBuf::from(value("--vocab")?)),
            "--max-depth" => {
                let depth = value("--max-depth")?;
                options.config.max_call_depth = match depth.as_str() {
                    "none" | "unlimited" => None,
                    n => Some(n.parse().map_err(|_| format!("invalid depth '{n}'"))?),
                };
            }
            "--seed" => {
                let seed = value("--seed")?;
                options.config.seed =
                    Some(seed.parse().map_err(|_| format!("invalid seed '{seed}'"))?);
            }
            "--local-assign" => options.config.assign_policy = AssignPolicy::LocalFirst,
            "--print-tree" => options.print_tree = true,
            "--dump-vocab" => options.dump_vocab = true,
            _ if arg.starts_with('-') => return Err(format!("unknown option '{arg}'")),
            _ if options.file.is_none() => options.file = Some(PathBuf::from(arg)),
            _ => return Err(format!("unexpected argument '{arg}'")),
        }
        i += 1;
    }
    Ok(Some(options))
}

fn run_file(path: &Path, config: &RunConfig) -> Result<ExitCode, RunError> {
    let report = run(path, config)?;
    io::stdout().flush().ok();
    emit(&report.diagnostics);
    Ok(ExitCode::SUCCESS)
}

fn tree_file(path: &Path, config: &RunConfig) -> Result<ExitCode, RunError> {
    let source = read_script(path)?;
    print!("{}", print_tree(&source, config)?);
    Ok(ExitCode::SUCCESS)
}

fn dump_vocab(config: &RunConfig) -> Result<ExitCode, RunError> {
    println!("{}", config.vocabulary()?.to_json()?);
    Ok(ExitCode::SUCCESS)
}

fn repl(config: &RunConfig) -> Result<ExitCode, RunError> {
    let mut session = Session::new(config)?;
    let text = session.text();
    println!("{}", text.banner);
    println!("{}", text.hint);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{}", session.prompt());
        io::stdout().flush().ok();
        let Some(Ok(line)) = lines.next() else {
            if let Some(reply) = session.finish() {
                show(reply);
            }
            println!();
            break;
        };
        match session.submit(&line) {
            Reply::Exit => break,
            Reply::Help => println!("{}", text.help),
            Reply::Globals(lines) => {
                for line in lines {
                    println!("{line}");
                }
            }
            reply => show(reply),
        }
    }
    println!("{}", text.goodbye);
    Ok(ExitCode::SUCCESS)
}

fn show(reply: Reply) {
    match reply {
        Reply::Ran(diagnostics) | Reply::Failed(_, diagnostics) => {
            println!();
            emit(&diagnostics);
        }
        Reply::Exit | Reply::Help | Reply::Globals(_) | Reply::NeedMore | Reply::Empty => {}
    }
}

fn emit(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!("{diagnostic}");
    }
}

fn print_usage() {
    println!("DAV natural-language script runner");
    println!();
    println!("Usage: dav [options] [file.dav]");
    println!();
    println!("With no file, starts an interactive session.");
    println!();
    println!("Options:");
    println!("  --lang <en|fr>       Language of the script (default: en)");
    println!("  --vocab <file.json>  Load a custom phrase table");
    println!("  --max-depth <n>      Maximum function call depth (default: 1000, or 'none')");
    println!("  --local-assign       Assignments inside functions bind locally");
    println!("  --seed <n>           Seed the random functions");
    println!("  --print-tree         Print the parsed program instead of running it");
    println!("  --dump-vocab         Print the active phrase table as JSON");
    println!("  -h, --help           Show this help message");
    println!("  -V, --version        Show version information");
}
