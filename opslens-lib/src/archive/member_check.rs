//! Safety checks applied to archive members before they are read.

use strum::Display;
use tar::EntryType;

/// Why an archive member was excluded from a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MemberRejection {
    #[strum(to_string = "absolute path")]
    AbsolutePath,

    #[strum(to_string = "parent directory segment in path")]
    ParentSegment,

    #[strum(to_string = "symbolic link")]
    SymbolicLink,

    #[strum(to_string = "hard link")]
    HardLink,
}

/// Check a member path for traversal hazards.
///
/// # Examples
///
/// ```
/// use opslens_lib::archive::{MemberRejection, check_member_path};
///
/// assert_eq!(check_member_path("host-1700000000/meta.txt"), Ok(()));
/// assert_eq!(check_member_path("/etc/passwd"), Err(MemberRejection::AbsolutePath));
/// assert_eq!(check_member_path("run/../../etc/passwd"), Err(MemberRejection::ParentSegment));
/// ```
pub fn check_member_path(path: &str) -> Result<(), MemberRejection> {
    if path.starts_with('/') {
        return Err(MemberRejection::AbsolutePath);
    }

    if path.split('/').any(|segment| segment == "..") {
        return Err(MemberRejection::ParentSegment);
    }

    Ok(())
}

/// Check a member's path and entry type.
pub fn check_member(path: &str, entry_type: EntryType) -> Result<(), MemberRejection> {
    check_member_path(path)?;

    if entry_type.is_symlink() {
        return Err(MemberRejection::SymbolicLink);
    }

    if entry_type.is_hard_link() {
        return Err(MemberRejection::HardLink);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_paths_are_accepted() {
        assert_eq!(check_member_path("meta.txt"), Ok(()));
        assert_eq!(check_member_path("web-01-20240101T000000/free.txt"), Ok(()));
        assert_eq!(check_member_path("./web-01/df.txt"), Ok(()));
    }

    #[test]
    fn test_dots_inside_names_are_not_segments() {
        assert_eq!(check_member_path("run/..meta.txt"), Ok(()));
        assert_eq!(check_member_path("run/meta...txt"), Ok(()));
    }

    #[test]
    fn test_absolute_path_is_rejected() {
        assert_eq!(check_member_path("/meta.txt"), Err(MemberRejection::AbsolutePath));
    }

    #[test]
    fn test_parent_segment_is_rejected() {
        assert_eq!(check_member_path(".."), Err(MemberRejection::ParentSegment));
        assert_eq!(check_member_path("../meta.txt"), Err(MemberRejection::ParentSegment));
        assert_eq!(check_member_path("run/../meta.txt"), Err(MemberRejection::ParentSegment));
        assert_eq!(check_member_path("run/.."), Err(MemberRejection::ParentSegment));
    }

    #[test]
    fn test_links_are_rejected() {
        assert_eq!(check_member("run/meta.txt", EntryType::Symlink), Err(MemberRejection::SymbolicLink));
        assert_eq!(check_member("run/meta.txt", EntryType::Link), Err(MemberRejection::HardLink));
    }

    #[test]
    fn test_regular_files_and_directories_pass() {
        assert_eq!(check_member("run/meta.txt", EntryType::Regular), Ok(()));
        assert_eq!(check_member("run/", EntryType::Directory), Ok(()));
    }

    #[test]
    fn test_rejection_display() {
        assert_eq!(MemberRejection::AbsolutePath.to_string(), "absolute path");
        assert_eq!(MemberRejection::HardLink.to_string(), "hard link");
    }
}
