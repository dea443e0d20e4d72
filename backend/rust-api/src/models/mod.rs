pub mod grade;
pub mod question;
pub mod user;
