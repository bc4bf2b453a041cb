pub mod dialect;
pub mod settings;

pub use dialect::*;
pub use settings::*;
