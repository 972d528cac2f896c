pub mod analytics;
pub mod badges;
pub mod models;
pub mod store;
pub mod validate;
