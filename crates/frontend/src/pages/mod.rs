//! Page components.

mod dashboard;
mod lead_form;
mod lead_import;
mod lead_list;
mod login;
mod users;

pub use dashboard::DashboardPage;
pub use lead_form::LeadFormPage;
pub use lead_import::LeadImportPage;
pub use lead_list::LeadListPage;
pub use login::LoginPage;
pub use users::UsersPage;
