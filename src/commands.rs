//! Subcommand implementations.

use derive_more::{Display, From};
use rtcore_runtime::int::{self, FixedWidth};
use rtcore_runtime::{ErrorToken, Fallible};

use crate::cli::{Command, Op, Width};

/// Operands on the command line are always decimal.
const OPERAND_BASE: u32 = 10;

#[derive(Debug, Display, From, PartialEq)]
pub enum CommandError {
    #[display("{_0}")]
    #[from]
    Runtime(ErrorToken),

    #[display("`{_0}` needs a second operand")]
    MissingOperand(&'static str),

    #[display("`{_0}` takes a single operand")]
    ExtraOperand(&'static str),
}

impl CommandError {
    /// Runtime failures exit with 1, usage mistakes with 2.
    pub fn exit_code(&self) -> i32 {
        match self {
            CommandError::Runtime(_) => 1,
            CommandError::MissingOperand(_) | CommandError::ExtraOperand(_) => 2,
        }
    }
}

pub fn run(command: &Command) -> Result<String, CommandError> {
    match command {
        Command::Parse { text, base, width } => Ok(match width {
            Width::W32 => int::parse_i32(text, *base)?.to_string(),
            Width::W64 => int::parse_i64(text, *base)?.to_string(),
        }),
        Command::Eval {
            op,
            lhs,
            rhs,
            width,
        } => match width {
            Width::W32 => eval(*op, lhs, rhs.as_deref(), int::parse_i32),
            Width::W64 => eval(*op, lhs, rhs.as_deref(), int::parse_i64),
        },
        Command::Format { value, base, width } => Ok(match width {
            Width::W32 => int::format_radix(int::parse_i32(value, OPERAND_BASE)?, *base)?,
            Width::W64 => int::format_radix(int::parse_i64(value, OPERAND_BASE)?, *base)?,
        }),
    }
}

fn eval<W: FixedWidth + std::fmt::Display>(
    op: Op,
    lhs: &str,
    rhs: Option<&str>,
    parse: fn(&str, u32) -> Fallible<W>,
) -> Result<String, CommandError> {
    let i = parse(lhs, OPERAND_BASE)?;
    tracing::debug!(?op, lhs = %i, "evaluating");
    let value = match (op, rhs) {
        (Op::Neg, None) => int::neg(i),
        (Op::Narrow, None) => return Ok(int::narrow_to_i32(i.widen())?.to_string()),
        (Op::Neg | Op::Narrow, Some(_)) => return Err(CommandError::ExtraOperand(op_name(op))),
        (_, None) => return Err(CommandError::MissingOperand(op_name(op))),
        (Op::Add, Some(rhs)) => int::add(i, parse(rhs, OPERAND_BASE)?),
        (Op::Sub, Some(rhs)) => int::sub(i, parse(rhs, OPERAND_BASE)?),
        (Op::Mul, Some(rhs)) => int::mul(i, parse(rhs, OPERAND_BASE)?),
        (Op::Div, Some(rhs)) => int::div_checked(i, parse(rhs, OPERAND_BASE)?)?,
        (Op::Mod, Some(rhs)) => int::modulo_checked(i, parse(rhs, OPERAND_BASE)?)?,
    };
    Ok(value.to_string())
}

fn op_name(op: Op) -> &'static str {
    match op {
        Op::Add => "add",
        Op::Sub => "sub",
        Op::Mul => "mul",
        Op::Neg => "neg",
        Op::Div => "div",
        Op::Mod => "mod",
        Op::Narrow => "narrow",
    }
}
