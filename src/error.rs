use std::io;

use snafu::Snafu;

/// Rejected ring configuration. Raised once, at construction; no ring is produced.
///
/// Full and empty rings are not errors: they surface as `false`, `None` or a
/// short count from the operation that hit them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub))]
pub enum ConfigError {
    #[snafu(display(
        "ring capacity must be a non-zero power of two, got {}",
        capacity
    ))]
    NotPowerOfTwo { capacity: u32 },
}

impl From<ConfigError> for io::Error {
    fn from(err: ConfigError) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, err)
    }
}
