pub mod about;
pub mod admin;
pub mod case_study;
pub mod hero;
pub mod process_step;
pub mod service;

pub use about::About;
pub use admin::Admin;
pub use case_study::CaseStudy;
pub use hero::Hero;
pub use process_step::ProcessStep;
pub use service::Service;
