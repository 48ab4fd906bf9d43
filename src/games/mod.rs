pub mod types;
pub mod catalog;
pub mod round;
pub mod numbers;
pub mod handwriting;
pub mod narration;

pub use types::*;
pub use catalog::{Catalog, MAX_NUMBER};
pub use round::{start_round, submit_answer, HINT_AFTER_WRONG_ATTEMPTS};
pub use handwriting::TracePad;
