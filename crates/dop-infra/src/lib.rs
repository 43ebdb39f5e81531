pub mod consent_store;
pub mod fs;

pub use consent_store::FileConsentRepository;
