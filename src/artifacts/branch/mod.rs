pub mod branch_name;
pub mod head;
pub mod revision;

pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";
pub const SYMBOLIC_REF_REGEX: &str = r"^refs/heads/(.+)$";
pub const OBJECT_ID_REGEX: &str = r"^[0-9a-f]{40}$";
pub const PARENT_REGEX: &str = r"^(.+)\^$";
pub const ANCESTOR_REGEX: &str = r"^(.+)\~(\d+)$";
pub const REF_PREFIX: &str = "refs/heads/";
pub const REF_ALIASES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "@" => "HEAD",
};
