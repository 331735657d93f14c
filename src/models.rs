pub mod auth;
pub mod brand;
pub mod conversation;
pub mod guidelines;
pub mod notification;
pub mod project;
pub mod quota;
pub mod rbac;
