//! Resource descriptors
//!
//! A [`ResourceInfo`] is an immutable metadata snapshot taken from a node at
//! query time. It is split into the three namespaces consumers expect from a
//! filesystem abstraction: `basic` (name, is_dir), `details` (type, size)
//! and `access` (permission bits). Every field is read-only; there is no way
//! to write a descriptor back.

use serde::Serialize;

/// native mode bits for a directory entry with no backing object
pub const DIR_MODE: u32 = 0o040000;

/// resource type enumeration, numbered to match the conventional
/// filesystem-info contract (1 = file, 2 = directory)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "u8")]
pub enum ResourceType {
    File = 1,
    Directory = 2,
}

impl From<ResourceType> for u8 {
    fn from(t: ResourceType) -> u8 {
        t as u8
    }
}

/// permission bits carried in their native integer form
///
/// Git trees store full entry modes (`0o100644`, `0o100755`, `0o040000`),
/// so the raw mode is kept and the access bits are derived from its low
/// nine bits. Synthetic directories use [`DIR_MODE`], which carries no
/// access bits at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub struct Permissions {
    mode: u32,
}

impl Permissions {
    /// wrap a native mode integer
    pub fn from_mode(mode: u32) -> Self {
        Self { mode }
    }

    /// the full native mode
    pub fn mode(&self) -> u32 {
        self.mode
    }

    /// the access bits (lower nine bits of the mode)
    pub fn bits(&self) -> u32 {
        self.mode & 0o777
    }

    /// render the access bits as an `rwxrwxrwx` triplet string
    pub fn as_rwx(&self) -> String {
        let bits = self.bits();
        let mut out = String::with_capacity(9);
        for shift in [6u32, 3, 0] {
            let part = (bits >> shift) & 0o7;
            out.push(if part & 0o4 != 0 { 'r' } else { '-' });
            out.push(if part & 0o2 != 0 { 'w' } else { '-' });
            out.push(if part & 0o1 != 0 { 'x' } else { '-' });
        }
        out
    }
}

impl From<Permissions> for String {
    fn from(p: Permissions) -> String {
        p.as_rwx()
    }
}

impl std::fmt::Display for Permissions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_rwx())
    }
}

/// the `basic` namespace: identity
#[derive(Debug, Clone, Serialize)]
pub struct BasicInfo {
    pub name: String,
    pub is_dir: bool,
}

/// the `details` namespace: type and size
#[derive(Debug, Clone, Serialize)]
pub struct DetailsInfo {
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub size: u64,
}

/// the `access` namespace: permission bits
#[derive(Debug, Clone, Serialize)]
pub struct AccessInfo {
    pub permissions: Permissions,
}

/// resource information snapshot for one node
#[derive(Debug, Clone, Serialize)]
pub struct ResourceInfo {
    pub basic: BasicInfo,
    pub details: DetailsInfo,
    pub access: AccessInfo,
}

impl ResourceInfo {
    /// build a descriptor from resolved parts
    ///
    /// The name must already be resolved by the caller: tree entries carry
    /// their own names, while commit root trees inherit the name of the ref
    /// (or `head`) they were reached through.
    pub fn new(name: impl Into<String>, resource_type: ResourceType, size: u64, mode: u32) -> Self {
        Self {
            basic: BasicInfo {
                name: name.into(),
                is_dir: resource_type != ResourceType::File,
            },
            details: DetailsInfo {
                resource_type,
                size,
            },
            access: AccessInfo {
                permissions: Permissions::from_mode(mode),
            },
        }
    }

    /// descriptor for a directory; directories always report size 0
    pub fn directory(name: impl Into<String>, mode: u32) -> Self {
        Self::new(name, ResourceType::Directory, 0, mode)
    }

    /// descriptor for a file
    pub fn file(name: impl Into<String>, size: u64, mode: u32) -> Self {
        Self::new(name, ResourceType::File, size, mode)
    }

    /// the resource name
    pub fn name(&self) -> &str {
        &self.basic.name
    }

    /// whether the resource is a directory
    pub fn is_dir(&self) -> bool {
        self.basic.is_dir
    }

    /// the resource size in bytes (0 for directories)
    pub fn size(&self) -> u64 {
        self.details.size
    }

    /// the permission bits
    pub fn permissions(&self) -> Permissions {
        self.access.permissions
    }

    /// check if a given key in a namespace is writable
    ///
    /// The projection is read-only, so the answer is `false` for every
    /// namespace and key, including unknown ones.
    pub fn is_writeable(&self, _namespace: &str, _key: &str) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_type_numbering() {
        assert_eq!(ResourceType::File as u8, 1);
        assert_eq!(ResourceType::Directory as u8, 2);
    }

    #[test]
    fn test_permissions_rwx() {
        assert_eq!(Permissions::from_mode(0o100644).as_rwx(), "rw-r--r--");
        assert_eq!(Permissions::from_mode(0o100755).as_rwx(), "rwxr-xr-x");
        // synthetic directory modes carry no access bits
        assert_eq!(Permissions::from_mode(DIR_MODE).as_rwx(), "---------");
    }

    #[test]
    fn test_permissions_bits() {
        let perms = Permissions::from_mode(0o100644);
        assert_eq!(perms.bits(), 0o644);
        assert_eq!(perms.mode(), 0o100644);
    }

    #[test]
    fn test_directory_info() {
        let info = ResourceInfo::directory("src", DIR_MODE);
        assert_eq!(info.name(), "src");
        assert!(info.is_dir());
        assert_eq!(info.size(), 0);
        assert_eq!(info.details.resource_type, ResourceType::Directory);
    }

    #[test]
    fn test_file_info() {
        let info = ResourceInfo::file("LICENSE", 1067, 0o100644);
        assert_eq!(info.name(), "LICENSE");
        assert!(!info.is_dir());
        assert_eq!(info.size(), 1067);
        assert_eq!(info.details.resource_type, ResourceType::File);
    }

    #[test]
    fn test_never_writeable() {
        let info = ResourceInfo::file("LICENSE", 10, 0o100644);
        assert!(!info.is_writeable("basic", "name"));
        assert!(!info.is_writeable("details", "size"));
        assert!(!info.is_writeable("nope", "nope"));
    }

    #[test]
    fn test_serialized_namespaces() {
        let info = ResourceInfo::file("LICENSE", 10, 0o100644);
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["basic"]["name"], "LICENSE");
        assert_eq!(json["basic"]["is_dir"], false);
        assert_eq!(json["details"]["type"], 1);
        assert_eq!(json["details"]["size"], 10);
        assert_eq!(json["access"]["permissions"], "rw-r--r--");
    }
}
