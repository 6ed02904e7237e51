pub mod config_record;
pub mod session;

pub use config_record::{ConfigRecord, CREDENTIAL_KEY};
pub use session::Session;
