//! jsexpr: parse and evaluate JS-like expressions from the command line.
//!
//! Usage:
//!   jsexpr parse [--dialect esnext] [--range] "a + b.c"
//!   jsexpr eval  [--context '{"a": 1}'] "a + 1"

use clap::{Parser as ClapParser, Subcommand, ValueEnum};
use miette::Report;
use std::process;

use jsexpr_core::text::LineMap;
use jsexpr_eval::value::ObjectMap;
use jsexpr_eval::{BasicEval, ES5Eval, ES6Eval, Evaluator, ScopeContext, Value};
use jsexpr_parser::presets::basic::basic_parser_with;
use jsexpr_parser::{es5_parser, es6_parser, esnext_parser, Parser, ParseError, PresetOptions};

#[derive(ClapParser, Debug)]
#[command(
    name = "jsexpr",
    about = "Parse and evaluate JS-like expressions",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Dialect {
    Basic,
    Es5,
    Es6,
    Esnext,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse an expression and print its ESTree AST as JSON.
    Parse {
        /// The expression text.
        expression: String,

        /// Grammar dialect.
        #[arg(long, value_enum, default_value_t = Dialect::Esnext)]
        dialect: Dialect,

        /// Annotate nodes with source ranges.
        #[arg(long)]
        range: bool,

        /// Parse a single expression instead of a statement list.
        #[arg(long)]
        expression_only: bool,

        /// Print compact JSON on one line.
        #[arg(long)]
        compact: bool,
    },

    /// Parse and evaluate an expression against a JSON context.
    Eval {
        /// The expression text.
        expression: String,

        /// Context object as JSON.
        #[arg(short, long, default_value = "{}")]
        context: String,

        /// Grammar dialect.
        #[arg(long, value_enum, default_value_t = Dialect::Esnext)]
        dialect: Dialect,

        /// Print the final context after evaluation (side effects).
        #[arg(long)]
        show_context: bool,
    },
}

fn report_parse_error(expression: &str, err: ParseError) {
    let lines = LineMap::new(expression);
    let lc = lines.line_and_column_of(err.position);
    eprintln!(
        "error: {} (line {}, column {})",
        err.description,
        lc.line + 1,
        lc.character + 1
    );
    let report = Report::new(err).with_source_code(expression.to_string());
    eprintln!("{report:?}");
}

fn build_parser(dialect: Dialect, statement: bool, range: bool) -> Parser {
    let options = PresetOptions {
        statement,
        range,
        ..PresetOptions::default()
    };
    match dialect {
        Dialect::Basic => basic_parser_with(options),
        Dialect::Es5 => es5_parser(options),
        Dialect::Es6 => es6_parser(options),
        Dialect::Esnext => esnext_parser(options),
    }
}

fn build_evaluator(dialect: Dialect) -> Box<dyn Evaluator> {
    match dialect {
        Dialect::Basic => Box::new(BasicEval::new()),
        Dialect::Es5 => Box::new(ES5Eval::new()),
        Dialect::Es6 | Dialect::Esnext => Box::new(ES6Eval::new()),
    }
}

fn json_to_value(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
        serde_json::Value::String(s) => Value::str(s.clone()),
        serde_json::Value::Array(items) => {
            Value::array(items.iter().map(json_to_value).collect())
        }
        serde_json::Value::Object(map) => Value::object(
            map.iter()
                .map(|(k, v)| (k.clone(), json_to_value(v)))
                .collect(),
        ),
    }
}

fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        // JSON has no undefined
        Value::Undefined | Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => serde_json::Number::from_f64(*n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::Str(s) => serde_json::Value::String(s.clone()),
        Value::Array(items) => {
            serde_json::Value::Array(items.borrow().iter().map(value_to_json).collect())
        }
        Value::Object(map) => serde_json::Value::Object(
            map.borrow()
                .iter()
                .map(|(k, v)| (k.clone(), value_to_json(v)))
                .collect(),
        ),
        Value::Function(_) => serde_json::Value::String("[function]".to_string()),
    }
}

fn run_parse(
    expression: &str,
    dialect: Dialect,
    range: bool,
    expression_only: bool,
    compact: bool,
) -> i32 {
    let parser = build_parser(dialect, !expression_only, range);
    match parser.parse(expression) {
        Ok(ast) => {
            let json = if compact {
                serde_json::to_string(&ast)
            } else {
                serde_json::to_string_pretty(&ast)
            };
            match json {
                Ok(text) => {
                    println!("{text}");
                    0
                }
                Err(err) => {
                    eprintln!("error: {err}");
                    1
                }
            }
        }
        Err(err) => {
            report_parse_error(expression, err);
            1
        }
    }
}

fn run_eval(expression: &str, context_json: &str, dialect: Dialect, show_context: bool) -> i32 {
    let context_value: serde_json::Value = match serde_json::from_str(context_json) {
        Ok(value) => value,
        Err(err) => {
            eprintln!("error: invalid context JSON: {err}");
            return 1;
        }
    };
    let serde_json::Value::Object(map) = &context_value else {
        eprintln!("error: context must be a JSON object");
        return 1;
    };

    let parser = build_parser(dialect, true, true);
    let ast = match parser.parse(expression) {
        Ok(ast) => ast,
        Err(err) => {
            report_parse_error(expression, err);
            return 1;
        }
    };

    let bindings: ObjectMap = map
        .iter()
        .map(|(k, v)| (k.clone(), json_to_value(v)))
        .collect();
    let ctx = ScopeContext::from_map(bindings);
    let evaluator = build_evaluator(dialect);

    match evaluator.eval(&ast, &ctx) {
        Ok(value) => {
            println!("{}", value_to_json(&value));
            if show_context {
                let final_ctx = value_to_json(&ctx.this_value());
                println!("{final_ctx}");
            }
            0
        }
        Err(err) => {
            let report = Report::new(err).with_source_code(expression.to_string());
            eprintln!("{report:?}");
            1
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Command::Parse {
            expression,
            dialect,
            range,
            expression_only,
            compact,
        } => run_parse(&expression, dialect, range, expression_only, compact),
        Command::Eval {
            expression,
            context,
            dialect,
            show_context,
        } => run_eval(&expression, &context, dialect, show_context),
    };
    process::exit(exit_code);
}
