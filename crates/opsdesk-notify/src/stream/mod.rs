//! Push-stream client
//!
//! - [`frame`]: wire frame shape and the protocol-noise classification rule
//! - [`client`]: connection lifecycle, delivery callbacks, cancellation

pub mod client;
pub mod frame;

pub use client::{NotificationStreamClient, StreamHandle};
pub use frame::{classify, parse_frame, WireFrame};
