use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("ur3-arci: No planning group={} is found (available: {:?}).", name, available)]
    NoGroup {
        name: String,
        available: Vec<String>,
    },
    #[error("ur3-arci: Length mismatch (model = {}, input = {})", model, input)]
    LengthMismatch { model: usize, input: usize },
    #[error("ur3-arci: Connection error : {}", message)]
    Connection { message: String },
    #[error("ur3-arci: Canceled : {}", message)]
    Canceled { message: String },
    #[error("ur3-arci: Planning failed (code = {}) : {}", code, message)]
    PlanningFailed { code: i32, message: String },
    #[error("ur3-arci: Other: {:?}", .0)]
    Other(#[from] anyhow::Error),
}
