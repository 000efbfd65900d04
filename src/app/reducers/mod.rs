mod connection;
mod editing;
pub mod helpers;
mod modal;
mod navigation;
mod query;

pub use connection::reduce_connection;
pub use editing::reduce_editing;
pub use modal::{reduce_modal, request_confirmation};
pub use navigation::reduce_navigation;
pub use query::reduce_query;
