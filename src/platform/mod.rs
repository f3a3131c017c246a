#[cfg(windows)]
pub mod windows;

#[cfg(not(windows))]
pub mod unix;

#[cfg(windows)]
pub use windows::{discover_trash_roots, is_writable};

#[cfg(not(windows))]
pub use unix::{discover_trash_roots, is_writable, TrashLocator};
