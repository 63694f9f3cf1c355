use std::io::{self, BufRead};

use bigdecimal::RoundingMode;
use clap::{Parser, ValueEnum};
use dailycalc::{
    Calculator,
    interpreter::{
        parser::core::format,
        value::context::{DEFAULT_DISPLAY_PLACES, DEFAULT_PRECISION, DecimalContext},
    },
    register::QueueRegister,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// dailycalc evaluates arithmetic expressions on exact decimals and points at
/// the spot of the input when something is wrong.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Significant digits kept by every arithmetic step.
    #[arg(long, default_value_t = DEFAULT_PRECISION,
          value_parser = clap::value_parser!(u64).range(1..=60))]
    precision: u64,

    /// Decimal places shown for results that are not exact.
    #[arg(long, default_value_t = DEFAULT_DISPLAY_PLACES,
          value_parser = clap::value_parser!(i64).range(0..=1000))]
    places: i64,

    /// Rounding mode for precision loss, `round()` and display.
    #[arg(long, value_enum, default_value_t = Rounding::HalfUp)]
    rounding: Rounding,

    /// Keep tiny results instead of snapping them to zero.
    #[arg(long)]
    no_snap: bool,

    /// Print the token stream instead of evaluating.
    #[arg(short, long)]
    tokens: bool,

    /// The expression to evaluate. Without one, every line of stdin is
    /// evaluated and stored in a register (`@a`, `@b`, ...).
    expression: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Rounding {
    HalfUp,
    HalfEven,
    HalfDown,
    Up,
    Down,
    Ceiling,
    Floor,
}

impl From<Rounding> for RoundingMode {
    fn from(rounding: Rounding) -> Self {
        match rounding {
            Rounding::HalfUp => Self::HalfUp,
            Rounding::HalfEven => Self::HalfEven,
            Rounding::HalfDown => Self::HalfDown,
            Rounding::Up => Self::Up,
            Rounding::Down => Self::Down,
            Rounding::Ceiling => Self::Ceiling,
            Rounding::Floor => Self::Floor,
        }
    }
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr))
                                  .with(filter)
                                  .init();

    let args = Args::parse();

    let mut context = DecimalContext::default();
    context.precision = args.precision;
    context.display_places = args.places;
    context.rounding = args.rounding.into();
    context.snap_to_zero = !args.no_snap;

    let mut calculator = Calculator::new(context);

    let failed = match &args.expression {
        Some(expression) if args.tokens => !print_tokens(expression),
        Some(expression) => match calculator.evaluate(expression, None) {
            Ok(number) => {
                println!("{number}");
                false
            },
            Err(_) => {
                eprintln!("{}", calculator.render_error(expression));
                true
            },
        },
        None => !run_lines(&mut calculator, args.tokens),
    };

    if failed {
        std::process::exit(1);
    }
}

fn print_tokens(expression: &str) -> bool {
    match format(expression) {
        Ok(tokens) => {
            println!("{tokens}");
            true
        },
        Err(e) => {
            eprintln!("{e}");
            false
        },
    }
}

/// Evaluates stdin line by line, storing every result in the register.
///
/// Returns `false` if any line failed.
fn run_lines(calculator: &mut Calculator, tokens: bool) -> bool {
    let mut register = QueueRegister::new();
    let mut all_ok = true;

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("Failed to read from stdin: {e}");
                return false;
            },
        };

        let source = line.trim();
        if source.is_empty() {
            continue;
        }

        if tokens {
            all_ok &= print_tokens(source);
            continue;
        }

        match calculator.evaluate(source, Some(&register)) {
            Ok(number) => {
                let shown = number.to_string();
                let slot = register.write(number);
                println!("@{slot}: {shown:<12}= {source}");
            },
            Err(_) => {
                eprintln!("{}", calculator.render_error(source));
                all_ok = false;
            },
        }
    }

    all_ok
}
