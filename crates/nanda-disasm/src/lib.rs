pub mod model;

pub use model::{load_listing, load_raw_bin, parse_listing, parse_raw_bin, read_u32, Image, Word};
