pub mod form;
pub mod images;
pub mod session;
mod utils;

pub use utils::{App, SubmissionArgs};
