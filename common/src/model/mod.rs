pub mod catalog;
pub mod dashboard;
pub mod link;
pub mod order;
pub mod response;
pub mod view;
