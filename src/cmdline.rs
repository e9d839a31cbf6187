use crate::environment::Environment;
use crate::interpreter;
use ansi_term::Colour;
use linefeed::{DefaultTerminal, Interface, ReadResult, Terminal};
use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::rc::Rc;

const PROMPT: &str = "charme> ";
const QUIT: &str = "quit";

#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Script {
        path: String,
        error: interpreter::Error,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::Script { path, error } => write!(f, "{}: {}", path, error),
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

pub fn setup() -> io::Result<Interface<DefaultTerminal>> {
    let interface = linefeed::Interface::new("charme")?;
    interface.set_prompt(PROMPT)?;
    if let Some(path) = history_path() {
        interface.load_history(path).ok();
    };
    Ok(interface)
}

fn history_path() -> Option<PathBuf> {
    match dirs::data_dir() {
        Some(mut path) => {
            path.push(".charme_history");
            Some(path)
        }
        None => None,
    }
}

pub fn save_history<T: Terminal>(interface: &Interface<T>) -> io::Result<()> {
    match history_path() {
        Some(path) => interface.save_history(path),
        None => Ok(()),
    }
}

// Only the bare word counts; " quit " is an ordinary (unbound) symbol.
fn is_quit(line: &str) -> bool {
    line == QUIT
}

/// Everything the shell prints in response to one line of input.
pub fn respond(line: &str, env: &Rc<Environment>, colour: bool) -> Vec<String> {
    interpreter::rep(line, env)
        .into_iter()
        .filter_map(|result| match result {
            Ok(value) if value.is_unspecified() => None,
            Ok(value) => Some(value.to_string()),
            Err(e) => {
                let message = format!("Error: {}", e);
                Some(match colour {
                    true => Colour::Red.paint(message).to_string(),
                    false => message,
                })
            }
        })
        .collect()
}

pub fn repl<T: Terminal>(interface: &Interface<T>, env: &Rc<Environment>) {
    let colour = atty::is(atty::Stream::Stdout);
    loop {
        match interface.read_line() {
            Ok(ReadResult::Eof) => break,
            Ok(ReadResult::Signal(sig)) => {
                writeln!(interface, "Received signal {:?}", sig).ok();
            }
            Ok(ReadResult::Input(line)) => {
                if is_quit(&line) {
                    break;
                }
                interface.add_history_unique(line.clone());
                for output in respond(&line, env, colour) {
                    writeln!(interface, "{}", output).ok();
                }
            }
            Err(e) => {
                writeln!(interface, "Error: {}", e).ok();
                break;
            }
        }
    }
}

/// The same loop as [`repl`] for input that isn't a terminal: no prompt, no history.
pub fn repl_plain<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    env: &Rc<Environment>,
) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        if is_quit(line) {
            break;
        }
        for response in respond(line, env, false) {
            writeln!(output, "{}", response)?;
        }
    }
    Ok(())
}

pub fn run_file(path: &str, env: &Rc<Environment>) -> Result<(), Error> {
    log::info!("loading {}", path);
    let source = std::fs::read_to_string(path)?;
    for result in interpreter::rep(&source, env) {
        match result {
            Ok(value) if value.is_unspecified() => (),
            Ok(value) => println!("{}", value),
            Err(error) => {
                return Err(Error::Script {
                    path: path.into(),
                    error,
                })
            }
        }
    }
    Ok(())
}

/// With file arguments, runs each file in turn and exits. Otherwise starts an interactive
/// session, or a plain one when stdin is redirected.
pub fn launch(args: Vec<String>, env: &Rc<Environment>) -> Result<(), Error> {
    let scripts = args.get(1..).unwrap_or(&[]);
    if !scripts.is_empty() {
        for path in scripts {
            run_file(path, env)?;
        }
        return Ok(());
    }

    if !atty::is(atty::Stream::Stdin) {
        log::info!("stdin is not a terminal, reading plain lines");
        let stdin = io::stdin();
        return Ok(repl_plain(stdin.lock(), io::stdout(), env)?);
    }

    log::info!("starting interactive session");
    let interface = setup()?;
    repl(&interface, env);
    save_history(&interface)?;
    Ok(())
}
