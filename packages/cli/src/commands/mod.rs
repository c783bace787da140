pub mod check;
pub mod init;
pub mod normalize;

pub use check::{check, CheckArgs};
pub use init::{init, InitArgs};
pub use normalize::{normalize, NormalizeArgs};
