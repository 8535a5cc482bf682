mod code;
mod credential;
mod version;

pub use code::{CalculateResult, Code, CodeDirectory, CodeEntry};
pub use credential::{Algorithm, Credential, OathType};
pub(crate) use credential::{pack, unpack};
pub use version::Version;
