//! Default values and well-known names.
//!
//! Centralized constants to avoid magic strings scattered across the codebase.

/// Bucket name forced in dry-run mode.
pub const EXAMPLE_BUCKET: &str = "example-bucket";

/// Config script picked up from the working directory when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = ".cfn-tool";

/// Variables dumped back from a sourced config script.
///
/// Extended regular expression usable both by `regex` and `grep -E`.
pub const DUMP_NAME_PATTERN: &str = "^(AWS_|CFN_TOOL_)";

/// Region variable bound to the `region` option.
pub const REGION_VAR: &str = "AWS_REGION";

/// Alias of [`REGION_VAR`] read by the AWS CLI and SDKs.
pub const DEFAULT_REGION_VAR: &str = "AWS_DEFAULT_REGION";
