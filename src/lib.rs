//! cfn-tool: CloudFormation deployment front end
//!
//! A library for resolving the tool's options from command-line flags, the
//! invoking shell's environment, and an external shell config script.

pub mod config;
pub mod env;
pub mod shell;
