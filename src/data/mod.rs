pub mod csv;

pub use csv::{load_distance_matrix, load_flow_vector};
