use crate::adf::{AbstractDialecticalFramework, AcceptanceCondition, LabelType};
use anyhow::{Context, Result};
use std::io::Write;

/// A writer for the KPP format of ADFs.
///
/// The output begins with the `s` statements, by increasing argument ids, followed by the `ac` statements.
/// It can be read back by a [KppReader](super::KppReader) as long as the labels do not contain
/// parentheses, commas, dots or whitespaces.
///
/// # Example
///
/// ```
/// # use crustadf::adf::{AbstractDialecticalFramework, AcceptanceCondition, ArgumentSet};
/// # use crustadf::io::KppWriter;
/// let adf = AbstractDialecticalFramework::new_with_conditions(
///     ArgumentSet::new_with_labels(&["a", "b"]),
///     vec![AcceptanceCondition::TrueConst, AcceptanceCondition::neg(AcceptanceCondition::atom(0))],
/// ).unwrap();
/// let mut buffer = Vec::new();
/// KppWriter::default().write_framework(&adf, &mut buffer).unwrap();
/// assert_eq!("s(a).\ns(b).\nac(a,c(v)).\nac(b,neg(a)).\n", String::from_utf8(buffer).unwrap());
/// ```
#[derive(Default)]
pub struct KppWriter {}

impl KppWriter {
    /// Writes a framework using the KPP format to the provided writer.
    pub fn write_framework<T: LabelType>(
        &self,
        framework: &AbstractDialecticalFramework<T>,
        writer: &mut dyn Write,
    ) -> Result<()> {
        let context = "while writing an ADF";
        for arg in framework.argument_set().iter() {
            writeln!(writer, "s({}).", arg).context(context)?;
        }
        for arg in framework.argument_set().iter() {
            let mut formula = String::new();
            format_condition(framework, framework.acceptance_condition(arg.id()), &mut formula);
            writeln!(writer, "ac({},{}).", arg, formula).context(context)?;
        }
        writer.flush().context(context)
    }
}

fn format_condition<T: LabelType>(
    framework: &AbstractDialecticalFramework<T>,
    condition: &AcceptanceCondition,
    buffer: &mut String,
) {
    match condition {
        AcceptanceCondition::Atom(a) => buffer.push_str(&framework.argument(*a).to_string()),
        AcceptanceCondition::TrueConst => buffer.push_str("c(v)"),
        AcceptanceCondition::FalseConst => buffer.push_str("c(f)"),
        AcceptanceCondition::And(children) | AcceptanceCondition::Or(children)
            if children.len() < 2 =>
        {
            match children.first() {
                Some(c) => format_condition(framework, c, buffer),
                None if matches!(condition, AcceptanceCondition::And(_)) => {
                    buffer.push_str("c(v)")
                }
                None => buffer.push_str("c(f)"),
            }
        }
        AcceptanceCondition::Not(_) => format_operation(framework, "neg", condition.children(), buffer),
        AcceptanceCondition::And(_) => format_operation(framework, "and", condition.children(), buffer),
        AcceptanceCondition::Or(_) => format_operation(framework, "or", condition.children(), buffer),
        AcceptanceCondition::Imp(_, _) => format_operation(framework, "imp", condition.children(), buffer),
        AcceptanceCondition::Iff(_, _) => format_operation(framework, "iff", condition.children(), buffer),
        AcceptanceCondition::Xor(_, _) => format_operation(framework, "xor", condition.children(), buffer),
    }
}

fn format_operation<T: LabelType>(
    framework: &AbstractDialecticalFramework<T>,
    name: &str,
    children: Vec<&AcceptanceCondition>,
    buffer: &mut String,
) {
    buffer.push_str(name);
    buffer.push('(');
    for (i, c) in children.into_iter().enumerate() {
        if i > 0 {
            buffer.push(',');
        }
        format_condition(framework, c, buffer);
    }
    buffer.push(')');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adf::ArgumentSet,
        io::{InstanceReader, KppReader},
    };
    use AcceptanceCondition as AC;

    fn write<T: LabelType>(adf: &AbstractDialecticalFramework<T>) -> String {
        let mut buffer = Vec::new();
        KppWriter::default().write_framework(adf, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_write_operators() {
        let adf = AbstractDialecticalFramework::new_with_conditions(
            ArgumentSet::new_with_labels(&["a", "b", "c"]),
            vec![
                AC::conj(vec![AC::atom(1), AC::atom(2), AC::neg(AC::atom(0))]),
                AC::imp(AC::atom(0), AC::FalseConst),
                AC::xor(AC::atom(0), AC::iff(AC::atom(1), AC::disj(vec![]))),
            ],
        )
        .unwrap();
        assert_eq!(
            "s(a).\ns(b).\ns(c).\nac(a,and(b,c,neg(a))).\nac(b,imp(a,c(f))).\nac(c,xor(a,iff(b,c(f)))).\n",
            write(&adf)
        );
    }

    #[test]
    fn test_write_degenerated_connectives() {
        let adf = AbstractDialecticalFramework::new_with_conditions(
            ArgumentSet::new_with_labels(&["a", "b"]),
            vec![AC::conj(vec![]), AC::disj(vec![AC::atom(0)])],
        )
        .unwrap();
        assert_eq!("s(a).\ns(b).\nac(a,c(v)).\nac(b,a).\n", write(&adf));
    }

    #[test]
    fn test_read_written() {
        let instance = "s(x).\ns(y).\nac(x,or(neg(y),c(f))).\nac(y,iff(x,y)).\n";
        let adf = KppReader::default()
            .read(&mut instance.as_bytes())
            .unwrap();
        assert_eq!(instance, write(&adf));
    }
}
