use super::{warning_result::WarningResult, InstanceReader, WarningHandler};
use crate::{
    adf::{AbstractDialecticalFramework, AcceptanceCondition, ArgumentSet},
    error::ReasoningError,
};
use anyhow::{anyhow, Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::{
    collections::BTreeMap,
    io::{BufRead, BufReader, Read},
};

const NAME_PATTERN: &str = r"[^(),.\s]+";

lazy_static! {
    static ref STATEMENT_PATTERN: Regex =
        Regex::new(&format!(r"^s\(({})\)$", NAME_PATTERN)).unwrap();
    static ref CONDITION_PATTERN: Regex =
        Regex::new(&format!(r"^ac\(({}),(.+)\)$", NAME_PATTERN)).unwrap();
}

// A statement, without its final dot and its whitespaces, with the index of the line it begins at.
struct RawStatement {
    line_index: usize,
    text: String,
}

fn split_statements(reader: &mut dyn Read) -> Result<Vec<RawStatement>> {
    let mut statements = vec![];
    let mut current = String::new();
    let mut current_line_index = 0;
    for (i, line) in BufReader::new(reader).lines().enumerate() {
        let l = line.with_context(|| format!("while reading line with index {}", i))?;
        for c in l.chars() {
            if c == '.' {
                statements.push(RawStatement {
                    line_index: current_line_index,
                    text: std::mem::take(&mut current),
                });
            } else if !c.is_whitespace() {
                if current.is_empty() {
                    current_line_index = i;
                }
                current.push(c);
            }
        }
    }
    if !current.is_empty() {
        return Err(anyhow!("unterminated statement \"{}\"", current))
            .with_context(|| format!("while reading line with index {}", current_line_index));
    }
    Ok(statements)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Name(&'a str),
    Open,
    Close,
    Comma,
}

fn tokenize(formula: &str) -> Vec<Token<'_>> {
    let mut tokens = vec![];
    let mut name_start = None;
    for (i, c) in formula.char_indices() {
        let token = match c {
            '(' => Token::Open,
            ')' => Token::Close,
            ',' => Token::Comma,
            _ => {
                if name_start.is_none() {
                    name_start = Some(i);
                }
                continue;
            }
        };
        if let Some(start) = name_start.take() {
            tokens.push(Token::Name(&formula[start..i]));
        }
        tokens.push(token);
    }
    if let Some(start) = name_start {
        tokens.push(Token::Name(&formula[start..]));
    }
    tokens
}

struct FormulaParser<'a, F>
where
    F: Fn(&str) -> Result<usize>,
{
    tokens: Vec<Token<'a>>,
    position: usize,
    resolve: F,
}

impl<'a, F> FormulaParser<'a, F>
where
    F: Fn(&str) -> Result<usize>,
{
    fn parse(formula: &'a str, resolve: F) -> Result<AcceptanceCondition> {
        let mut parser = FormulaParser {
            tokens: tokenize(formula),
            position: 0,
            resolve,
        };
        let condition = parser.parse_formula()?;
        if parser.position != parser.tokens.len() {
            return Err(anyhow!("unexpected trailing content in formula \"{}\"", formula));
        }
        Ok(condition)
    }

    fn next_token(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.position).copied();
        self.position += 1;
        token
    }

    fn expect(&mut self, expected: Token) -> Result<()> {
        match self.next_token() {
            Some(t) if t == expected => Ok(()),
            Some(t) => Err(anyhow!("expected {:?}, found {:?}", expected, t)),
            None => Err(anyhow!("expected {:?}, found the end of the formula", expected)),
        }
    }

    fn expect_name(&mut self) -> Result<&'a str> {
        match self.next_token() {
            Some(Token::Name(n)) => Ok(n),
            Some(t) => Err(anyhow!("expected a name, found {:?}", t)),
            None => Err(anyhow!("expected a name, found the end of the formula")),
        }
    }

    fn parse_formula(&mut self) -> Result<AcceptanceCondition> {
        let name = self.expect_name()?;
        if self.tokens.get(self.position) != Some(&Token::Open) {
            return (self.resolve)(name).map(AcceptanceCondition::Atom);
        }
        self.position += 1;
        let condition = if name == "c" {
            match self.expect_name()? {
                "v" => AcceptanceCondition::TrueConst,
                "f" => AcceptanceCondition::FalseConst,
                other => return Err(anyhow!("unknown constant \"{}\"", other)),
            }
        } else {
            let mut operands = vec![self.parse_formula()?];
            while self.tokens.get(self.position) == Some(&Token::Comma) {
                self.position += 1;
                operands.push(self.parse_formula()?);
            }
            build_operation(name, operands)?
        };
        self.expect(Token::Close)?;
        Ok(condition)
    }
}

fn build_operation(
    operator: &str,
    mut operands: Vec<AcceptanceCondition>,
) -> Result<AcceptanceCondition> {
    let arity_error = |expected: &str, n: usize| {
        Err(anyhow!(
            "operator {} expects {} operand(s), got {}",
            operator,
            expected,
            n
        ))
    };
    match operator {
        "and" | "or" => {
            if operands.len() < 2 {
                return arity_error("at least 2", operands.len());
            }
            Ok(if operator == "and" {
                AcceptanceCondition::conj(operands)
            } else {
                AcceptanceCondition::disj(operands)
            })
        }
        "neg" => match operands.pop() {
            Some(op) if operands.is_empty() => Ok(AcceptanceCondition::neg(op)),
            _ => arity_error("1", operands.len() + 1),
        },
        "imp" | "iff" | "xor" => {
            if operands.len() != 2 {
                return arity_error("2", operands.len());
            }
            let right = operands.remove(1);
            let left = operands.remove(0);
            Ok(match operator {
                "imp" => AcceptanceCondition::imp(left, right),
                "iff" => AcceptanceCondition::iff(left, right),
                _ => AcceptanceCondition::xor(left, right),
            })
        }
        _ => Err(anyhow!("unknown operator \"{}\"", operator)),
    }
}

/// A reader for the KPP format of ADFs.
///
/// This object is used to read an [`AbstractDialecticalFramework`] encoded using the format of the ADF systems
/// (DIAMOND, k++ADF, ...).
/// The [LabelType](crate::adf::LabelType) of the returned frameworks is [String].
///
/// # KPP format
///
/// Each statement ends with a dot; whitespaces are ignored, and statements may span several lines.
/// `s(a).` declares an argument `a`, and `ac(a, φ).` gives its acceptance condition.
/// Formulas are built from argument names, the constants `c(v)` and `c(f)`, and the operators
/// `neg`, `and`, `or` (at least two operands), `imp`, `iff` and `xor` (two operands).
/// The conditions may refer to arguments declared later; an argument without condition gets `c(v)`.
///
/// ```text
/// s(a).
/// s(b).
/// s(c).
/// ac(a, neg(b)).
/// ac(b, neg(a)).
/// ac(c, and(a, or(b, c(v)))).
/// ```
///
/// # Example
///
/// ```
/// # use crustadf::adf::AbstractDialecticalFramework;
/// # use crustadf::io::{InstanceReader, KppReader};
/// let reader = KppReader::default();
/// let adf = reader.read(&mut "s(a). s(b). ac(a,neg(b)).".as_bytes()).unwrap();
/// assert_eq!(2, adf.n_arguments());
/// assert_eq!(1, adf.n_links());
/// ```
#[derive(Default)]
pub struct KppReader {
    warning_handlers: Vec<WarningHandler>,
}

impl KppReader {
    fn consume_warnings<T>(&self, result: WarningResult<T, String>, line_index: usize) -> T {
        result.consume_warnings(|warnings| {
            for w in warnings.iter() {
                self.warning_handlers
                    .iter()
                    .for_each(|h| (h)(1 + line_index, w.to_string()));
            }
        })
    }
}

impl InstanceReader<String> for KppReader {
    fn read(&self, reader: &mut dyn Read) -> Result<AbstractDialecticalFramework<String>> {
        let statements = split_statements(reader)?;
        let mut labels: Vec<String> = vec![];
        let mut conditions = vec![];
        for statement in statements.iter() {
            let context = || format!("while reading line with index {}", statement.line_index);
            if let Some(c) = STATEMENT_PATTERN.captures(&statement.text) {
                let label = c[1].to_string();
                let mut result = WarningResult::Ok(());
                if labels.contains(&label) {
                    result = result.warn(format!("argument {} is declared more than once", label));
                } else {
                    labels.push(label);
                }
                self.consume_warnings(result, statement.line_index);
                continue;
            }
            if let Some(c) = CONDITION_PATTERN.captures(&statement.text) {
                let owner = c.get(1).map(|m| m.as_str()).unwrap_or_default();
                let formula = c.get(2).map(|m| m.as_str()).unwrap_or_default();
                conditions.push((statement.line_index, owner, formula));
                continue;
            }
            return Err(anyhow!("syntax error in \"{}.\"", statement.text)).with_context(context);
        }
        let argument_set = ArgumentSet::new_with_labels(&labels);
        let mut parsed = BTreeMap::new();
        for (line_index, owner, formula) in conditions {
            let context = || format!("while reading line with index {}", line_index);
            let owner_id = argument_set
                .get_argument(&owner.to_string())
                .map_err(|_| ReasoningError::UnknownArgumentReference {
                    argument: owner.to_string(),
                    owner: owner.to_string(),
                })
                .with_context(context)?
                .id();
            let resolve = |name: &str| -> Result<usize> {
                argument_set
                    .get_argument(&name.to_string())
                    .map(|arg| arg.id())
                    .map_err(|_| {
                        anyhow::Error::from(ReasoningError::UnknownArgumentReference {
                            argument: name.to_string(),
                            owner: owner.to_string(),
                        })
                    })
            };
            let condition = FormulaParser::parse(formula, resolve).with_context(context)?;
            let mut result = WarningResult::Ok(());
            if parsed.insert(owner_id, condition).is_some() {
                result = result.warn(format!(
                    "the acceptance condition of {} is given more than once; the last one is kept",
                    owner
                ));
            }
            self.consume_warnings(result, line_index);
        }
        let mut adf = AbstractDialecticalFramework::new_with_argument_set(argument_set);
        for (id, condition) in parsed {
            adf.set_acceptance_condition_by_id(id, condition)?;
        }
        Ok(adf)
    }

    fn add_warning_handler(&mut self, h: WarningHandler) {
        self.warning_handlers.push(h);
    }
}
