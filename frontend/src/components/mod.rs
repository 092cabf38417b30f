//! UI components of the upload widget.
//!
//! - [`UploadWidget`] - binds the server-rendered form and file inputs
//! - [`ProgressIndicator`] - progress bar appended to the form on first submit

mod upload;
mod progress;

pub use upload::*;
pub use progress::*;
