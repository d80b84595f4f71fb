//! Domain models for the marketplace.
//!
//! Every model serializes with camelCase keys. Money fields serialize as
//! decimal strings. Password hashes never appear on any model.

pub mod driver;
pub mod menu_item;
pub mod order;
pub mod session;
pub mod stats;
pub mod user;
pub mod vendor;

pub use driver::{Driver, NewDriver};
pub use menu_item::{MenuItem, NewMenuItem};
pub use order::{Assignment, NewOrder, Order};
pub use session::{CurrentUser, keys as session_keys};
pub use stats::PlatformStats;
pub use user::{NewUser, User};
pub use vendor::{NewVendor, Vendor};
