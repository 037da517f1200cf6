//! Formats command handler.

use deckport::io::Format;

/// Lists the supported formats and their extensions.
pub fn cmd_formats() {
    println!("Supported formats:");
    for format in Format::all() {
        let content = if format.is_binary() { "binary" } else { "text" };
        println!(
            "  {:<10} {:<20} ({content})",
            format.as_str(),
            format.extensions().join(", ")
        );
    }
}
