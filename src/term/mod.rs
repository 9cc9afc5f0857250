extern crate ansi_term;
extern crate ctrlc;
extern crate linefeed;
use ansi_term::{Colour, Style};
use c42::lang::Error;
use c42::mach::{Event, Program, Runtime};
use clap::Parser;
use linefeed::{Interface, ReadResult};
use log::{debug, info, warn};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

mod logger;

#[derive(Parser)]
#[command(name = "c42", version, about = "Run a C42 program")]
struct Args {
    /// Source file
    #[arg(default_value = "code.cft")]
    file: PathBuf,

    /// Block to start at instead of `main`
    #[arg(long, value_name = "BLOCK")]
    entry: Option<String>,

    /// Scheduler steps per batch
    #[arg(long, default_value_t = 5000)]
    cycles: usize,

    /// Log scheduler activity to stderr, repeat for more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Returns the process exit status.
pub fn main() -> i32 {
    let args = Args::parse();
    logger::init(args.verbose);

    let source = match std::fs::read_to_string(&args.file) {
        Ok(source) => source,
        Err(error) => {
            eprintln!(
                "{} {}: {}",
                Colour::Red.paint("error:"),
                args.file.display(),
                error
            );
            return 1;
        }
    };
    let program = Program::parse(&source);
    info!("loaded {} blocks from {}", program.len(), args.file.display());

    let mut runtime = Runtime::new(program);
    if let Err(error) = runtime.start(args.entry.as_deref()) {
        report(&error);
        return 1;
    }

    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    if let Err(error) = ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    }) {
        warn!("Ctrl-C handler not installed: {}", error);
    }

    match main_loop(&mut runtime, args.cycles.max(1), interrupted) {
        Ok(status) => status,
        Err(error) => {
            eprintln!("{} {}", Colour::Red.paint("error:"), error);
            1
        }
    }
}

fn main_loop(
    runtime: &mut Runtime,
    cycles: usize,
    interrupted: Arc<AtomicBool>,
) -> std::io::Result<i32> {
    let mut console = Console::default();
    loop {
        if interrupted.load(Ordering::SeqCst) {
            runtime.interrupt();
            interrupted.store(false, Ordering::SeqCst);
            return Ok(130);
        };
        match runtime.execute(cycles) {
            Event::Print(s) => {
                let mut stdout = std::io::stdout();
                stdout.write_all(s.as_bytes())?;
                stdout.flush()?;
            }
            Event::Input => match console.read_line()? {
                Some(line) => runtime.enter(&line),
                None => {
                    debug!("end of input");
                    runtime.interrupt();
                    return Ok(0);
                }
            },
            Event::ClearScreen => console.clear_screen()?,
            Event::Error(error) => {
                report(&error);
                return Ok(1);
            }
            Event::Running => {}
            Event::Stopped => return Ok(0),
        }
    }
}

/// Print a fatal diagnostic followed by the finish banner.
fn report(error: &Error) {
    let mut out = String::from("\n");
    if let Some(command) = error.command() {
        out.push_str(&format!("\n  -> {}\n", Style::new().bold().paint(command)));
    }
    if let Some(line_number) = error.line_number() {
        out.push_str(&format!("[{}] ", line_number));
    }
    out.push_str(&format!(
        "CFTE{} : {}\n",
        error.code(),
        Colour::Red.paint(error.message())
    ));
    out.push_str("[Program Finished]");
    println!("{}", out);
}

/// Terminal access for INPUT and CLEAR_CONSOLE.
/// Falls back to plain stdin when no terminal is attached.
#[derive(Default)]
struct Console {
    interface: Option<Interface<linefeed::DefaultTerminal>>,
    plain: bool,
}

impl Console {
    fn read_line(&mut self) -> std::io::Result<Option<String>> {
        std::io::stdout().flush()?;
        if !self.plain && self.interface.is_none() {
            match Interface::new("c42") {
                Ok(interface) => {
                    interface.set_prompt("")?;
                    self.interface = Some(interface);
                }
                Err(error) => {
                    debug!("no terminal for input: {}", error);
                    self.plain = true;
                }
            }
        }
        if let Some(interface) = &self.interface {
            return match interface.read_line()? {
                ReadResult::Input(line) => Ok(Some(line)),
                ReadResult::Signal(_) | ReadResult::Eof => Ok(None),
            };
        }
        let mut line = String::new();
        if std::io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn clear_screen(&mut self) -> std::io::Result<()> {
        match mortal::Terminal::new() {
            Ok(terminal) => terminal.clear_screen(),
            Err(error) => {
                debug!("no terminal to clear: {}", error);
                Ok(())
            }
        }
    }
}
