//! Octa - 8-instruction tape VM
//! Command-line interface for compiling and running tape-language and assembly programs

mod source;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::*;
use octa_core::output::{render_hex, render_raw_hex, render_text, render_trace};
use octa_core::{InputEncoding, Language, Vm, VmConfig, compile};
use source::Source;
use std::io::{self, Cursor, Read, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "octa")]
#[command(version)]
#[command(about = "Octa - compile and run programs for the 8-instruction tape VM", long_about = None)]
struct Cli {
    /// Source code, or a path to a file containing it
    #[arg(value_name = "SOURCE")]
    source: String,

    /// Output mode
    #[arg(value_enum, value_name = "MODE")]
    mode: Option<Mode>,

    /// Trace every executed instruction and dump the output buffer as hex
    #[arg(short, long, conflicts_with_all = ["compile", "hex"])]
    debug: bool,

    /// Print the compiled program without running it
    #[arg(short, long, conflicts_with = "hex")]
    compile: bool,

    /// Hex-encoded input, hex-rendered output
    #[arg(short = 'x', long)]
    hex: bool,

    /// Source language (default: from file extension, else tape)
    #[arg(short, long, value_enum)]
    lang: Option<Lang>,

    /// External input; stdin is read on the first INP otherwise
    #[arg(short, long, value_name = "TEXT")]
    input: Option<String>,

    /// Number of tape cells
    #[arg(long, env = "OCTA_TAPE_SIZE")]
    tape_size: Option<usize>,

    /// Capacity of the input and output buffers
    #[arg(long, env = "OCTA_BUFFER_SIZE")]
    buffer_size: Option<usize>,

    /// Abort after this many executed instructions
    #[arg(long, env = "OCTA_MAX_CYCLES")]
    max_cycles: Option<u64>,

    /// Print the compiled program as JSON (compile mode)
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    #[value(skip)]
    Run,
    #[value(alias = "d")]
    Debug,
    #[value(alias = "c")]
    Compile,
    #[value(alias = "x")]
    Hex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Lang {
    Tape,
    #[value(alias = "assembly")]
    Asm,
}

impl From<Lang> for Language {
    fn from(lang: Lang) -> Self {
        match lang {
            Lang::Tape => Language::Tape,
            Lang::Asm => Language::Assembly,
        }
    }
}

impl Cli {
    /// Positional mode wins over flags
    fn mode(&self) -> Mode {
        if let Some(mode) = self.mode {
            return mode;
        }
        if self.debug {
            Mode::Debug
        } else if self.compile {
            Mode::Compile
        } else if self.hex {
            Mode::Hex
        } else {
            Mode::Run
        }
    }

    fn vm_config(&self, mode: Mode) -> VmConfig {
        let mut config = VmConfig::from_env()
            .with_trace(mode == Mode::Debug)
            .with_input_encoding(if mode == Mode::Hex {
                InputEncoding::Hex
            } else {
                InputEncoding::Raw
            });
        if let Some(size) = self.tape_size {
            config = config.with_tape_size(size);
        }
        if let Some(size) = self.buffer_size {
            config = config.with_buffer_size(size);
        }
        if let Some(limit) = self.max_cycles {
            config = config.with_max_cycles(limit);
        }
        config
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "octa=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let source = Source::load(&cli.source)?;
    let language = cli.lang.map(Language::from).unwrap_or_else(|| source.language());
    let mode = cli.mode();

    tracing::debug!(?language, ?mode, path = ?source.path, "loaded source");

    let program = compile(language, &source.text).context("compilation failed")?;

    let mut stdout = io::stdout().lock();

    if mode == Mode::Compile {
        if cli.json {
            writeln!(stdout, "{}", serde_json::to_string_pretty(&program)?)?;
        } else {
            writeln!(stdout, "{}", program.listing())?;
        }
        return Ok(());
    }

    let input: Box<dyn Read> = match &cli.input {
        Some(text) => Box::new(Cursor::new(text.clone().into_bytes())),
        None => Box::new(io::stdin()),
    };

    let mut vm = Vm::new(program, cli.vm_config(mode))?.with_input(input);
    let output = vm.run().context("execution failed")?;

    match mode {
        Mode::Debug => {
            writeln!(stdout, "{}", render_trace(vm.trace()))?;
            writeln!(stdout, "{}", render_raw_hex(&output))?;
        }
        Mode::Hex => writeln!(stdout, "{}", render_hex(&output))?,
        Mode::Run | Mode::Compile => stdout.write_all(&render_text(&output))?,
    }
    stdout.flush()?;

    Ok(())
}
