//! Readers and writers for the two XML dialects the pipeline consumes:
//! the emulator's `-listxml` machine dump and HyperSpin menu databases.

pub mod error;
pub mod listing;
pub mod menu;

pub use error::XmlError;
pub use listing::{parse_listing, parse_listing_file};
pub use menu::{escape_genre, parse_menu, parse_menu_file, render_menu};
