//! XPath 2.0 string functions missing from the XPath 1.0 core library.

use sxd_xpath::context::Evaluation;
use sxd_xpath::function::{Error as FunctionError, Function};
use sxd_xpath::{Context, Value};

/// Register `lower-case`, `upper-case` and `ends-with` on `context`.
pub fn register(context: &mut Context<'_>) {
    context.set_function("lower-case", CaseMapping(str::to_lowercase));
    context.set_function("upper-case", CaseMapping(str::to_uppercase));
    context.set_function("ends-with", EndsWith);
}

struct CaseMapping(fn(&str) -> String);

impl Function for CaseMapping {
    fn evaluate<'c, 'd>(
        &self,
        _context: &Evaluation<'c, 'd>,
        args: Vec<Value<'d>>,
    ) -> Result<Value<'d>, FunctionError> {
        let args = string_args(args, 1)?;
        Ok(Value::String((self.0)(&args[0])))
    }
}

struct EndsWith;

impl Function for EndsWith {
    fn evaluate<'c, 'd>(
        &self,
        _context: &Evaluation<'c, 'd>,
        args: Vec<Value<'d>>,
    ) -> Result<Value<'d>, FunctionError> {
        let args = string_args(args, 2)?;
        Ok(Value::Boolean(args[0].ends_with(args[1].as_str())))
    }
}

fn string_args(args: Vec<Value<'_>>, expected: usize) -> Result<Vec<String>, FunctionError> {
    let actual = args.len();
    if actual < expected {
        return Err(FunctionError::NotEnoughArguments { expected, actual });
    }
    if actual > expected {
        return Err(FunctionError::TooManyArguments { expected, actual });
    }
    Ok(args.iter().map(Value::string).collect())
}
