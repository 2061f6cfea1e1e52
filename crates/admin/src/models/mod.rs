//! Admin view state: tabs, flash messages and session keys.

pub mod flash;
pub mod session;
pub mod tab;

pub use flash::{Flash, FlashKind};
pub use session::keys as session_keys;
pub use tab::Tab;
