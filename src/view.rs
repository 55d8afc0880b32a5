pub mod coord_map;
pub mod display;
pub mod display_path;
pub mod style;
