//! Output rendering and writing

pub mod computed;
pub mod writer;

pub use computed::{format_json_array, render_group, ComputedOutputs, OUTPUT_NAMES};
pub use writer::OutputWriter;
