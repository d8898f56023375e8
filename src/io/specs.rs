use crate::adf::{AbstractDialecticalFramework, LabelType};
use anyhow::Result;
use std::io::Read;

/// The type of callback functions to call when warnings are raised while parsing an ADF.
///
/// The first parameter is the line number (starting at 1) at which the warning was raised.
pub type WarningHandler = Box<dyn Fn(usize, String)>;

/// A trait implemented by objects able to read Abstract Dialectical Frameworks.
pub trait InstanceReader<T>
where
    T: LabelType,
{
    /// Reads an [`AbstractDialecticalFramework`].
    ///
    /// In case warnings are raised, the callback functions registered by [add_warning_handler](Self::add_warning_handler) are triggered.
    ///
    /// # Example
    ///
    /// ```
    /// # use crustadf::adf::AbstractDialecticalFramework;
    /// # use crustadf::io::{InstanceReader, KppReader};
    /// fn read_adf_from_str(s: &str) -> AbstractDialecticalFramework<String> {
    ///     let reader = KppReader::default();
    ///     reader.read(&mut s.as_bytes()).expect("invalid KPP ADF")
    /// }
    /// # read_adf_from_str("s(a).");
    /// ```
    fn read(&self, reader: &mut dyn Read) -> Result<AbstractDialecticalFramework<T>>;

    /// Adds a callback function to call when warnings are raised while parsing an ADF.
    fn add_warning_handler(&mut self, h: WarningHandler);
}
