pub mod catalog;
pub mod cli;
pub mod config;
pub mod detail_view;
pub mod properties_api;
pub mod typeahead;
