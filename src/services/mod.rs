//! External collaborator services
//!
//! Clients for the REST providers and local CLI tools the reports call.

pub mod ai;
pub mod command;
pub mod shodan;

pub use ai::{AiAnalysis, AiProvider, AiService, AiServiceError};
pub use command::{CommandOutput, CommandRunner};
pub use shodan::ShodanClient;
