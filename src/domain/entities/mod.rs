pub mod candidate;
pub mod content;
pub mod education;
pub mod experience;
pub mod option_fields;
pub mod resume;
pub mod template;
pub mod user;
