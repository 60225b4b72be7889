//! Application state module

mod app_state;
mod application_form;
mod context;
mod entities;
mod forms;
mod item_list;
mod loading_state;

pub use app_state::*;
pub use application_form::*;
pub use context::*;
pub use entities::*;
pub use forms::*;
pub use item_list::*;
pub use loading_state::*;
