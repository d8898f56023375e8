use crate::adf::{AbstractDialecticalFramework, Interpretation, LabelType};
use anyhow::{Context, Result};
use std::io::Write;

/// A writer for the interpretations computed by the solvers.
///
/// Each interpretation is written on its own line, as the list of `t(a)`, `f(a)` and `u(a)` terms
/// giving the values of the arguments by increasing ids.
/// The fact that no model exists is written `NONE`.
///
/// # Example
///
/// ```
/// # use crustadf::adf::{AbstractDialecticalFramework, ArgumentSet, Interpretation, TruthValue};
/// # use crustadf::io::InterpretationWriter;
/// let adf = AbstractDialecticalFramework::new_with_argument_set(ArgumentSet::new_with_labels(&["a", "b"]));
/// let interpretation = Interpretation::from_values(vec![TruthValue::In, TruthValue::Undecided]);
/// let mut buffer = Vec::new();
/// InterpretationWriter::default()
///     .write_interpretation(&adf, &interpretation, &mut buffer)
///     .unwrap();
/// assert_eq!("t(a) u(b)\n", String::from_utf8(buffer).unwrap());
/// ```
#[derive(Default)]
pub struct InterpretationWriter {}

impl InterpretationWriter {
    /// Writes an interpretation of the arguments of a framework.
    pub fn write_interpretation<T: LabelType>(
        &self,
        framework: &AbstractDialecticalFramework<T>,
        interpretation: &Interpretation,
        writer: &mut dyn Write,
    ) -> Result<()> {
        let context = "while writing an interpretation";
        let terms = interpretation
            .values()
            .iter()
            .enumerate()
            .map(|(id, v)| format!("{}({})", v.as_ref(), framework.argument(id)))
            .collect::<Vec<String>>();
        writeln!(writer, "{}", terms.join(" ")).context(context)?;
        writer.flush().context(context)
    }

    /// Writes the text associated with the fact the problem has no model.
    pub fn write_no_model(&self, writer: &mut dyn Write) -> Result<()> {
        let context = "while writing problem has no model";
        writeln!(writer, "NONE").context(context)?;
        writer.flush().context(context)
    }

    /// Writes a number of models.
    pub fn write_model_count(&self, writer: &mut dyn Write, count: usize) -> Result<()> {
        let context = "while writing a model count";
        writeln!(writer, "{}", count).context(context)?;
        writer.flush().context(context)
    }
}
