//! PS/2 keyboard input channel.
//!
//! - **frame**: 11-bit device-to-host frames from clock/data samples
//! - **scancode**: Set 2 byte stream → physical key transitions
//! - **layout**: US layout forms and the alternate-key table
//! - **keyboard**: the queue-backed [`InputSource`](crate::translator::InputSource)

pub mod frame;
pub mod keyboard;
pub mod layout;
pub mod scancode;

pub use frame::FrameError;
pub use keyboard::Ps2Keyboard;
