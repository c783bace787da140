pub mod error;
pub mod filesystem;
pub mod i18n;
pub mod model;
pub mod result;
pub mod text;

pub use error::*;
pub use filesystem::*;
pub use i18n::*;
pub use model::*;
pub use result::*;
pub use text::*;
