// jack-analyzer: Jack tokenizer and parser with XML output and a tree inspector

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, error, info, warn};
use ratatui::{backend::CrosstermBackend, Terminal};

use jack_analyzer::parser::{Parser, Tokenizer};
use jack_analyzer::render::{tokens_to_xml, tree_to_xml, NodeCounts};
use jack_analyzer::sources;
use jack_analyzer::ui::{App, Document};

/// Command-line options
#[derive(Debug, Clone, PartialEq, Eq)]
struct Options {
    input: PathBuf,
    tokens: bool,
    inspect: bool,
    out_dir: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut input = None;
    let mut tokens = false;
    let mut inspect = false;
    let mut out_dir = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--tokens" => tokens = true,
            "--inspect" => inspect = true,
            "--out-dir" => {
                let dir = iter
                    .next()
                    .ok_or_else(|| "--out-dir requires a directory".to_string())?;
                out_dir = Some(PathBuf::from(dir));
            }
            flag if flag.starts_with("--") => return Err(format!("Unknown option '{}'", flag)),
            path if input.is_none() => input = Some(PathBuf::from(path)),
            extra => return Err(format!("Unexpected argument '{}'", extra)),
        }
    }

    let input = input.ok_or_else(|| "No input path provided".to_string())?;
    Ok(Options {
        input,
        tokens,
        inspect,
        out_dir,
    })
}

fn print_usage(program_name: &str) {
    eprintln!();
    eprintln!(
        "Usage: {} <file.jack | directory> [--tokens] [--inspect] [--out-dir <dir>]",
        program_name
    );
    eprintln!();
    eprintln!("  --tokens           also write the token stream to <Name>T.xml");
    eprintln!("  --inspect          browse the parse trees in the terminal instead of writing XML");
    eprintln!("  --out-dir <dir>    write XML files into <dir> instead of next to the sources");
    eprintln!();
    eprintln!("Set RUST_LOG=debug for per-file details.");
}

/// Analyze one file; `Ok(false)` means the file has a syntax error
fn analyze_file(path: &Path, options: &Options) -> anyhow::Result<bool> {
    let source =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;

    if options.tokens {
        match Tokenizer::new(&source).tokenize() {
            Ok(tokens) => {
                let out = sources::output_path(path, options.out_dir.as_deref(), "T");
                fs::write(&out, tokens_to_xml(&tokens))
                    .with_context(|| format!("writing {}", out.display()))?;
                debug!("{}: {} tokens -> {}", path.display(), tokens.len(), out.display());
            }
            Err(err) => {
                error!("{}: {}", path.display(), err);
                return Ok(false);
            }
        }
    }

    let class = match Parser::new(Tokenizer::new(&source)).compile_class() {
        Ok(class) => class,
        Err(err) => {
            error!("{}: {}", path.display(), err);
            return Ok(false);
        }
    };

    let counts = NodeCounts::of(&class);
    debug!(
        "{}: {} subroutines, {} statements, {} tokens",
        path.display(),
        counts.get(jack_analyzer::parser::Label::SubroutineDec),
        counts.statements(),
        counts.leaves
    );

    let out = sources::output_path(path, options.out_dir.as_deref(), "");
    fs::write(&out, tree_to_xml(&class)).with_context(|| format!("writing {}", out.display()))?;
    info!("{} -> {}", path.display(), out.display());
    Ok(true)
}

/// Parse every file for the inspector; failed files are kept and shown with their error
fn load_documents(files: &[PathBuf]) -> anyhow::Result<Vec<Document>> {
    let mut documents = Vec::with_capacity(files.len());
    for path in files {
        let source =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let document = Document::parse(path.clone(), source);
        if let Err(err) = &document.outcome {
            warn!("{}: {}", path.display(), err);
        }
        documents.push(document);
    }
    Ok(documents)
}

fn run_inspector(files: &[PathBuf]) -> anyhow::Result<()> {
    let documents = load_documents(files)?;

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(documents);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("running inspector")
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let program_name = args
        .first()
        .map(|s| s.as_str())
        .unwrap_or("jack-analyzer");

    let options = match parse_args(args.get(1..).unwrap_or_default()) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            print_usage(program_name);
            std::process::exit(1);
        }
    };

    let files = sources::discover(&options.input)?;
    info!("Found {} source file(s)", files.len());

    if options.inspect {
        return run_inspector(&files);
    }

    if let Some(dir) = &options.out_dir {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let mut failed = 0;
    for path in &files {
        if !analyze_file(path, &options)? {
            failed += 1;
        }
    }

    if failed > 0 {
        error!("{} of {} file(s) failed to parse", failed, files.len());
        std::process::exit(1);
    }
    info!("Parsed {} file(s) successfully", files.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let options = parse_args(&args(&["Square", "--tokens", "--out-dir", "out"])).unwrap();
        assert_eq!(
            options,
            Options {
                input: PathBuf::from("Square"),
                tokens: true,
                inspect: false,
                out_dir: Some(PathBuf::from("out")),
            }
        );
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["a", "b"])).is_err());
        assert!(parse_args(&args(&["a", "--verbose"])).is_err());
        assert!(parse_args(&args(&["a", "--out-dir"])).is_err());
    }

    #[test]
    fn test_analyze_file_writes_both_outputs() {
        let dir = std::env::temp_dir().join(format!("jack-analyzer-main-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let source = dir.join("Main.jack");
        fs::write(&source, "class Main { function void main() { return; } }").unwrap();

        let options = Options {
            input: source.clone(),
            tokens: true,
            inspect: false,
            out_dir: None,
        };
        assert!(analyze_file(&source, &options).unwrap());
        assert!(fs::read_to_string(dir.join("Main.xml"))
            .unwrap()
            .starts_with("<class>\n"));
        assert!(fs::read_to_string(dir.join("MainT.xml"))
            .unwrap()
            .starts_with("<tokens>\n"));

        fs::write(&source, "class Main { function }").unwrap();
        assert!(!analyze_file(&source, &options).unwrap());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test_log::test]
    fn test_load_documents_keeps_failures() {
        let dir = std::env::temp_dir().join(format!("jack-analyzer-load-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let good = dir.join("Good.jack");
        let bad = dir.join("Bad.jack");
        fs::write(&good, "class Good { }").unwrap();
        fs::write(&bad, "class Bad { let }").unwrap();

        let documents = load_documents(&[good, bad]).unwrap();
        assert_eq!(documents.len(), 2);
        assert!(documents[0].outcome.is_ok());
        assert!(documents[1].outcome.is_err());

        assert!(load_documents(&[dir.join("Missing.jack")]).is_err());
        let _ = fs::remove_dir_all(&dir);
    }
}
