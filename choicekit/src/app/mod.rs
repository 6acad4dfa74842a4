mod app_error;
mod choicekit_app;
mod operation;

pub use app_error::AppError;
pub use choicekit_app::ChoicekitApp;
pub use operation::ChoicekitOperation;
