// Adapters layer: HTTP clients for the external phone validation services.

pub mod abstractapi;
pub mod http;
pub mod numverify;
pub mod twilio;

pub use abstractapi::AbstractApiProvider;
pub use numverify::NumVerifyProvider;
pub use twilio::TwilioProvider;
