//! UI Components

mod auth_page;
mod board_view;
mod category_column;
mod new_category_form;
mod task_card;

pub use auth_page::AuthPage;
pub use board_view::BoardView;
pub use category_column::CategoryColumn;
pub use new_category_form::NewCategoryForm;
pub use task_card::TaskCard;
