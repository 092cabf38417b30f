//! Entry point for trunk builds of the widget

pub fn main() {
    if let Err(e) = fileshare_upload::init() {
        web_sys::console::error_1(&e);
    }
}
