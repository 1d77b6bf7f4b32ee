pub mod forms;
pub mod model;
pub mod service;

pub use forms::{DeleteAccountForm, LoginForm, RegisterForm, UpdateProfileForm};
pub use service::AccountService;
