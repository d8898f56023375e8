//! Objects used to read and write ADFs and the interpretations computed on them.

mod interpretation_writer;
pub use interpretation_writer::InterpretationWriter;

mod kpp_reader;
pub use kpp_reader::KppReader;

mod kpp_writer;
pub use kpp_writer::KppWriter;

mod specs;
pub use specs::InstanceReader;
pub use specs::WarningHandler;

mod warning_result;
