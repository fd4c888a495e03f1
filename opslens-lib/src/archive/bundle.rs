use super::{BundleFile, check_member};
use crate::Result;
use flate2::bufread::GzDecoder;
use ohno::{IntoAppError, bail};
use std::io::Read;
use strum::IntoEnumIterator;
use tar::Archive;

/// Log target for archive handling
const LOG_TARGET: &str = "   archive";

/// The safety-filtered, recognized files of a diagnostic bundle, held in memory.
#[derive(Debug, Clone, Default)]
pub struct Bundle {
    members: Vec<Member>,
}

#[derive(Debug, Clone)]
struct Member {
    path: String,
    data: Vec<u8>,
}

impl Bundle {
    /// Decode a gzip-compressed tar archive.
    ///
    /// Members failing [`check_member`] are skipped without their content
    /// being read. Of the remaining regular files, only the first member
    /// matching each [`BundleFile`] is read; everything else is skipped unread.
    ///
    /// # Errors
    ///
    /// Returns an error if the gzip stream or the tar structure is corrupt, or
    /// if the archive holds no entries at all.
    pub fn from_gzip(archive: &[u8]) -> Result<Self> {
        let decoder = GzDecoder::new(archive);
        let mut archive = Archive::new(decoder);

        let mut entry_count = 0_usize;
        let mut pending: Vec<BundleFile> = BundleFile::iter().collect();
        let mut members = Vec::new();
        for entry in archive.entries().into_app_err("reading archive entries")? {
            let mut entry = entry.into_app_err("reading archive entry")?;
            entry_count += 1;

            let path = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
            let entry_type = entry.header().entry_type();

            if let Err(reason) = check_member(&path, entry_type) {
                log::debug!(target: LOG_TARGET, "Skipping archive member '{path}': {reason}");
                continue;
            }

            if !entry_type.is_file() {
                continue;
            }

            let Some(index) = pending.iter().position(|file| path_matches(&path, file.file_name())) else {
                log::trace!(target: LOG_TARGET, "Ignoring archive member '{path}'");
                continue;
            };
            let _ = pending.swap_remove(index);

            let mut data = Vec::new();
            let _ = entry
                .read_to_end(&mut data)
                .into_app_err_with(|| format!("reading archive member '{path}'"))?;

            members.push(Member { path, data });
        }

        if entry_count == 0 {
            bail!("archive holds no entries");
        }

        log::debug!(
            target: LOG_TARGET,
            "Decoded bundle with {} usable member(s) out of {entry_count}",
            members.len()
        );

        Ok(Self { members })
    }

    /// Number of retained members.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Paths of the retained members, in archive order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.path.as_str())
    }

    /// Read a logical file by name, tolerating any leading directory.
    ///
    /// The first member whose path equals `name` or ends with `/name` wins.
    /// Returns an empty string when no member matches. Invalid UTF-8 is
    /// replaced with U+FFFD.
    #[must_use]
    pub fn read_text(&self, name: &str) -> String {
        match self.members.iter().find(|m| path_matches(&m.path, name)) {
            Some(member) => String::from_utf8_lossy(&member.data).into_owned(),
            None => {
                log::debug!(target: LOG_TARGET, "No '{name}' in bundle");
                String::new()
            }
        }
    }

    /// Read one of the well-known bundle files.
    #[must_use]
    pub fn read_file(&self, file: BundleFile) -> String {
        self.read_text(file.file_name())
    }
}

/// Whether `path` is `name` itself or ends with `/name`.
fn path_matches(path: &str, name: &str) -> bool {
    path.strip_suffix(name)
        .is_some_and(|prefix| prefix.is_empty() || prefix.ends_with('/'))
}

#[cfg(test)]
pub(crate) mod test_archive {
    //! Builds gzip-compressed tar archives for tests, including hostile ones.

    use flate2::Compression;
    use flate2::write::GzEncoder;
    use tar::{Builder, EntryType, Header};

    pub struct TestArchive {
        builder: Builder<GzEncoder<Vec<u8>>>,
    }

    impl TestArchive {
        pub fn new() -> Self {
            Self {
                builder: Builder::new(GzEncoder::new(Vec::new(), Compression::default())),
            }
        }

        pub fn file(mut self, path: &str, content: impl AsRef<[u8]>) -> Self {
            let content = content.as_ref();
            let mut header = new_header(path, EntryType::Regular);
            header.set_size(content.len() as u64);
            header.set_cksum();
            self.builder.append(&header, content).unwrap();
            self
        }

        pub fn dir(mut self, path: &str) -> Self {
            let mut header = new_header(path, EntryType::Directory);
            header.set_cksum();
            self.builder.append(&header, std::io::empty()).unwrap();
            self
        }

        pub fn symlink(mut self, path: &str, target: &str) -> Self {
            let mut header = new_header(path, EntryType::Symlink);
            header.set_link_name(target).unwrap();
            header.set_cksum();
            self.builder.append(&header, std::io::empty()).unwrap();
            self
        }

        pub fn hard_link(mut self, path: &str, target: &str) -> Self {
            let mut header = new_header(path, EntryType::Link);
            header.set_link_name(target).unwrap();
            header.set_cksum();
            self.builder.append(&header, std::io::empty()).unwrap();
            self
        }

        pub fn finish(self) -> Vec<u8> {
            self.builder.into_inner().unwrap().finish().unwrap()
        }
    }

    // `Header::set_path` refuses hostile paths, so the name field is written directly.
    fn new_header(path: &str, entry_type: EntryType) -> Header {
        let mut header = Header::new_gnu();
        header.set_entry_type(entry_type);
        header.set_mode(0o644);
        header.set_size(0);

        let name = &mut header.as_old_mut().name;
        name.fill(0);
        name[..path.len()].copy_from_slice(path.as_bytes());

        header
    }
}
