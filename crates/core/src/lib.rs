pub mod entry;
pub mod method;
pub mod money;
pub mod period;

pub use entry::{CollectionEntry, EntryStatus};
pub use method::CollectionMethod;
pub use money::Lira;
pub use period::{day_of, month_of, week_of, DateRange};
