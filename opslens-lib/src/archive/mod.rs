//! Safe access to the members of a diagnostic bundle
//!
//! A diagnostic bundle is a gzip-compressed tar archive produced by a
//! collection script on the host. The script nests every file under a
//! run-specific top-level directory (typically `<host>-<timestamp>/`), so
//! files are located by suffix rather than by exact path.
//!
//! # Implementation Model
//!
//! [`Bundle::from_gzip`] decodes the whole archive in a single pass. Every
//! member goes through [`check_member`] first: absolute paths, paths with a
//! `..` segment, and symbolic or hard links are dropped before their content
//! is ever read. Of the regular files left, only the first member matching
//! each [`BundleFile`] is buffered, so unrelated content never reaches memory.
//!
//! Text lookups through [`Bundle::read_text`] are best-effort: a missing file
//! yields an empty string and invalid UTF-8 is replaced rather than rejected.
//! The only fatal conditions are an archive that cannot be decompressed or
//! walked, and one that holds no entries at all.

mod bundle;
mod bundle_file;
mod member_check;

pub use bundle::Bundle;
pub use bundle_file::BundleFile;
pub use member_check::{MemberRejection, check_member, check_member_path};
