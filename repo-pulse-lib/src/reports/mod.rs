mod console;
mod json;

pub use console::generate as generate_console;
pub use console::generate_listing as generate_console_listing;
pub use json::generate as generate_json;
