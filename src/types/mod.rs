//! Data types for the workbook model and the operation wire schema.

mod address;
mod cell;
mod operation;
mod style;
mod workbook;

pub use address::*;
pub use cell::*;
pub use operation::*;
pub use style::*;
pub use workbook::*;
