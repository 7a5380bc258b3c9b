pub mod communitydtos;
pub mod projectdtos;
pub mod userdtos;
pub mod workspacedtos;
