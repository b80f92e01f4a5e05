//! Command-line interface for the rtcore runtime driver.

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "rtcore")]
#[command(about = "Drive the rtcore runtime kernel from the shell", long_about = None)]
pub struct Cli {
    /// Log filter such as `debug` or `rtcore_runtime=trace` (overrides RUST_LOG)
    #[arg(long, global = true)]
    pub log: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse a numeral the way generated code does
    Parse {
        #[arg(allow_hyphen_values = true)]
        text: String,
        #[arg(long, default_value_t = 10)]
        base: u32,
        #[arg(long, value_enum, default_value_t = Width::W64)]
        width: Width,
    },

    /// Evaluate one integer operation on decimal operands
    Eval {
        #[arg(value_enum)]
        op: Op,
        #[arg(allow_hyphen_values = true)]
        lhs: String,
        #[arg(allow_hyphen_values = true)]
        rhs: Option<String>,
        #[arg(long, value_enum, default_value_t = Width::W64)]
        width: Width,
    },

    /// Render a decimal integer in another base
    Format {
        #[arg(allow_hyphen_values = true)]
        value: String,
        #[arg(long, default_value_t = 10)]
        base: u32,
        #[arg(long, value_enum, default_value_t = Width::W64)]
        width: Width,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Width {
    #[value(name = "32")]
    W32,
    #[value(name = "64")]
    W64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Neg,
    Div,
    Mod,
    /// Narrow a 64-bit operand to 32 bits
    Narrow,
}
