mod category;
mod entry;
mod release;

pub use self::category::Category;
pub use self::entry::{ProjectEntry, ProjectListing};
pub use self::release::Release;
