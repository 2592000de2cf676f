//! Finding card news: tagged top-level frames in Figma design files.
//!
//! The newest frame is the last tagged one in document order, either in a
//! single configured file or in whichever of a team's files was modified most
//! recently. See [selector::find_latest].

pub mod error;
pub mod frame;
pub mod gather;
pub mod selector;
