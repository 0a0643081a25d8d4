pub mod assembler;
pub mod record;

pub use assembler::{BirthData, BodyPlacement, Chart, ChartAssembler};
pub use record::ChartRecord;
