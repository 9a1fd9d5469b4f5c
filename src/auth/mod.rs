pub mod demo;
pub mod error;
pub mod hosted;
pub mod service;
pub mod session;
pub mod traits;

pub use demo::{DemoProvider, DEMO_EMAIL, DEMO_PASSWORD};
pub use error::AuthError;
pub use hosted::HostedProvider;
pub use service::AuthService;
pub use session::{FileSessionStore, MemorySessionStore, SessionStore, SESSION_KEY};
pub use traits::{IdentityProvider, SignUpRequest};
