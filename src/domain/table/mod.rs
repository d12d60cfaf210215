// ============================================================
// TABLE DOMAIN LAYER
// ============================================================
// Grid, cell and column types shared by loading, cleaning,
// anonymization and export. No I/O.

mod cell;
mod column;
#[allow(clippy::module_inception)]
mod table;

pub use cell::{format_number, Cell};
pub use column::{Column, ColumnKind};
pub use table::Table;
