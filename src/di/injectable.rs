use crate::di::Container;
use crate::error::Result;

/// Types that construct themselves from services held in a [`Container`].
///
/// Controllers implement this to pull their collaborators, for example a
/// bound `Arc<dyn ProductDao>`.
pub trait Injectable: Sized + Send + Sync + 'static {
    /// # Errors
    /// Returns an error if any required dependency is not registered.
    fn inject(container: &Container) -> Result<Self>;
}
