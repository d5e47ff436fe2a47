//! Model bundle loading and score inference.

pub mod bundle;
pub mod inference;
pub mod loader;

pub use bundle::{ModelBundle, StandardScaler, SubjectModel};
pub use inference::predict_all;
pub use loader::load_bundle;
