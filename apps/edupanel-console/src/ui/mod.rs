pub mod alert;
pub mod filter;
pub mod form;
pub mod localized_input;
pub mod modal;
pub mod paginator;
pub mod table;
