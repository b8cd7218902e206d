//! Plaque Core Library
//!
//! Bibliothèque principale pour la compilation de tables de transferts
//! en listes de travail Gemini (gwl) et en plaques de destination
//! comptabilisées par puits.

pub mod error;
pub mod gwl;
pub mod logging;
pub mod plate;
pub mod transfer;
pub mod units;
pub mod wells;

// Réexportations principales
pub use error::{Result, TransferError};
pub use gwl::{Pipette, Record, Wash, WorkList};
pub use logging::init_logging;
pub use plate::{Plate, WellContent};
pub use transfer::{CompileConfig, CompileOutput, TransferRow, WorkListCompiler};
pub use wells::{index_to_wellname, wellname_to_index, PlateSize};
