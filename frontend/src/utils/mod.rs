pub mod dom;

pub use dom::{document, find_first_input, find_inputs};
