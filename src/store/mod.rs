pub mod state;
pub mod file;
pub mod share;

pub use state::AvailabilityState;
pub use file::JsonFileStore;
pub use share::{decode_share, encode_share, share_fragment, SHARE_PREFIX};

use crate::error::Result;

/// Somewhere an availability state can be kept between runs.
pub trait StateStore {
    /// Returns `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<AvailabilityState>>;
    fn save(&self, state: &AvailabilityState) -> Result<()>;
    fn clear(&self) -> Result<()>;

    fn load_or_default(&self) -> Result<AvailabilityState> {
        Ok(self.load()?.unwrap_or_default())
    }
}
