//! Domain types shared across NotifyHub crates.

pub mod notification;

pub use notification::Notification;
