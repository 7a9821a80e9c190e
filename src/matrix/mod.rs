// Matrix data structures and structural transforms

pub mod compressed;
pub mod config;
pub mod conversion;
pub mod selection;
pub mod triplet;

pub use compressed::CompressedMatrix;
pub use config::{BuildConfig, Direction, DuplicatePolicy};
pub use conversion::{build, build_with, switch_direction, transpose};
pub use selection::{select_columns, select_rows};
pub use triplet::{TripletBuilder, TripletMatrix};
