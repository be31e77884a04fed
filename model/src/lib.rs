pub mod domain;
pub mod error;
pub mod features;
pub mod predictor;

pub use domain::{ClientRecord, Contact, Education, Job, Marital, Month, Poutcome, YesNo};
pub use error::{ModelErr, Result};
pub use features::{FEATURE_LEN, TRANSFORM_VERSION, transform};
pub use predictor::{ModelKind, Prediction, Predictor};
