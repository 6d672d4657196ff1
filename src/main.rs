use std::{
    collections::HashSet,
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
    process::ExitCode,
    time::Instant,
};

use brainwalk::{
    interpreter::DEFAULT_TAPE_SIZE, lexer::lexer::Lexer, parser::parser::Parser as ProgramParser,
    AstInterpreter, CTranspiler, EofBehavior, Error, ParseFlags, Printer, Program, Runtime,
    RuntimeConfig,
};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use log::LevelFilter;

/// Brainf**k printer/interpreter/C transpiler
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The file to operate on
    #[arg()]
    file: PathBuf,

    /// What to do with the program, `run` if nothing is given
    #[arg(value_enum)]
    commands: Vec<Commands>,

    /// Parser optimizations to turn off
    #[arg(short, long, value_enum)]
    disable: Vec<Optimizations>,

    /// Treat a `]` with no open loop as the end of the program instead of an error
    #[arg(long)]
    lenient: bool,

    #[arg(short, long, default_value_t = DEFAULT_TAPE_SIZE)]
    tape_size: usize,

    /// What `,` stores once input runs out
    #[arg(long, value_enum, default_value_t = EofBehavior::Zero)]
    eof: EofBehavior,

    /// Write the transpiled C here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log more, repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Hash, PartialEq, Eq)]
pub enum Optimizations {
    /// Fold runs of the same instruction into one
    FoldRuns,
    /// Turn `[-]` and `[+]` into a single clear
    ClearIdiom,
}

#[derive(ValueEnum, Debug, Clone, Hash, PartialEq, Eq)]
enum Commands {
    /// Output the lexer
    Tokens,
    /// Output the ast
    Ast,
    /// Output the canonical source
    Print,
    /// Run the AST with stdin/stdout
    Run,
    /// Output an equivalent C program
    Transpile,
}

impl Args {
    fn parse_flags(&self) -> ParseFlags {
        let mut flags = ParseFlags::default();
        for optimization in self.disable.iter() {
            flags.remove(match optimization {
                Optimizations::FoldRuns => ParseFlags::FOLD_RUNS,
                Optimizations::ClearIdiom => ParseFlags::CLEAR_IDIOM,
            });
        }
        flags.set(ParseFlags::LENIENT_LOOP_END, self.lenient);
        flags
    }

    fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            tape_size: self.tape_size,
            eof: self.eof,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(match args.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .init();
    log::debug!("args: {args:?}");

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{0:}: {1:}", "Error".red(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Error> {
    let mut commands: HashSet<Commands> = HashSet::from_iter(args.commands.iter().cloned());
    if commands.is_empty() {
        commands.insert(Commands::Run);
    }

    log::info!("Running {}", args.file.display());

    // comments may be in any encoding, only the command characters matter
    let bytes = std::fs::read(&args.file)?;
    let text = String::from_utf8_lossy(&bytes);
    let mut lexer = Lexer::new(&text);

    log::info!("{}", "Starting lexing".blue());
    let now = Instant::now();
    let tokens = lexer.tokenize();
    log::info!("{} {:.2?}", "Finished lexing in".green(), now.elapsed());

    let stdout = io::stdout();

    if commands.contains(&Commands::Tokens) {
        let mut out = stdout.lock();
        for token in tokens.iter() {
            writeln!(out, "{}\t{:?}", token.position, token.kind)?;
        }
    }

    let flags = args.parse_flags();
    log::info!("{} {:?}", "Starting parsing".blue(), flags);
    let mut now = Instant::now();
    let program = ProgramParser::new(&tokens, flags).parse_program()?;
    log::info!("{} {:.2?}", "Finished parsing in".green(), now.elapsed());

    if commands.contains(&Commands::Ast) {
        println!("{:#?}", program);
        println!("{:?}", program.stats());
    }

    if commands.contains(&Commands::Print) {
        program.accept(&mut Printer::new(stdout.lock()))?;
    }

    if commands.contains(&Commands::Run) {
        log::info!("{}", "Starting ast-interpreter".blue());
        now = Instant::now();
        let mut runtime = Runtime::new(args.runtime_config(), io::stdin().lock(), stdout.lock());
        AstInterpreter::new(&mut runtime).interpret(&program)?;
        log::info!(
            "{} {:.2?}",
            "Finished ast-interpreter in".green(),
            now.elapsed()
        );
    }

    if commands.contains(&Commands::Transpile) {
        log::info!("{}", "Starting transpile".blue());
        now = Instant::now();
        match &args.output {
            Some(path) => transpile(&program, args.runtime_config(), BufWriter::new(File::create(path)?))?,
            None => transpile(&program, args.runtime_config(), stdout.lock())?,
        }
        log::info!("{} {:.2?}", "Finished transpile in".green(), now.elapsed());
    }

    Ok(())
}

fn transpile<W: Write>(program: &Program, config: RuntimeConfig, out: W) -> io::Result<()> {
    let mut transpiler = CTranspiler::new(out, config);
    program.accept(&mut transpiler)?;
    transpiler.into_inner().flush()
}
