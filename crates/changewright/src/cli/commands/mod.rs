//! CLI commands

mod add;
mod completions;
mod fmt;
mod init;
mod release;
mod show;

pub use add::AddCommand;
pub use completions::CompletionsCommand;
pub use fmt::FmtCommand;
pub use init::InitCommand;
pub use release::ReleaseCommand;
pub use show::ShowCommand;
