pub mod assets;
pub mod auth;
pub mod brands;
pub mod conversations;
pub mod guidelines;
pub mod members;
pub mod notifications;
pub mod projects;
pub mod quota;
pub mod rbac;
