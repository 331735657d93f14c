pub mod auth;
pub mod brand_service;
pub mod guidelines_service;
pub mod mailer;
pub mod member_service;
pub mod notification_service;
pub mod quota_service;
pub mod sharing_service;
