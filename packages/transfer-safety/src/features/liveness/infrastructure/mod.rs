pub mod table_liveness;

pub use table_liveness::{TableCallGraphLiveness, TableTransferLiveness};
