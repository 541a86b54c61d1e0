pub mod branch_name;

pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";

/// Directory prefix of branch refs
pub const REF_PREFIX: &str = "refs/heads/";

/// Branch HEAD points at in a fresh repository
pub const DEFAULT_BRANCH: &str = "master";
