mod session;

pub use session::{UreqSession, MAX_REDIRECTS};
