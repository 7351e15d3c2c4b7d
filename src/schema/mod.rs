pub mod conversion;
pub mod definition;
pub mod descriptor;
pub mod field;

pub use conversion::*;
pub use definition::*;
pub use descriptor::*;
pub use field::*;
