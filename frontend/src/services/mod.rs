//! Browser services used by the widget.
//!
//! # Services
//!
//! - [`upload`] - multipart POST through `XMLHttpRequest` with progress events
//! - [`notify`] - alerts and page reload

pub mod upload;
pub mod notify;

pub use upload::*;
pub use notify::*;
