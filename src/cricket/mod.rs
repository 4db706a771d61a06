pub mod catalog;
pub mod commentary;
pub mod metrics;
pub mod models;
pub mod oracle;
pub mod predictor;
pub mod validator;

pub use models::{MatchInput, MatchSnapshot};
pub use oracle::{LogisticModel, WinProbabilityModel};
pub use predictor::{predict, Prediction};
