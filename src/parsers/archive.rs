//! Bundle archive handling.
//!
//! A `.reqifz` file is a ZIP archive carrying one or more `.reqif`
//! documents. Members are spooled through a scoped scratch directory that
//! is removed when extraction returns, on success and on error alike.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use tracing::debug;
use zip::ZipArchive;

use crate::error::{ArchiveErrorKind, ReqifError, Result};

/// One `.reqif` document pulled out of a bundle.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    /// Member path inside the archive.
    pub member_name: String,
    /// Full XML content.
    pub content: String,
}

/// Extract every `.reqif` member of a bundle, in archive order.
///
/// Fails with an archive error when the file is not a ZIP archive or no
/// member carries the `.reqif` extension.
pub fn extract_documents(path: &Path) -> Result<Vec<ExtractedDocument>> {
    let display = path.display().to_string();
    let file = File::open(path).map_err(|e| ReqifError::io(path, e))?;
    let mut archive = ZipArchive::new(file).map_err(|e| {
        ReqifError::archive(&display, ArchiveErrorKind::InvalidArchive(e.to_string()))
    })?;

    let scratch = tempfile::tempdir().map_err(ReqifError::from)?;
    let mut documents = Vec::new();

    for index in 0..archive.len() {
        let mut member = archive.by_index(index).map_err(|e| {
            ReqifError::archive(
                &display,
                ArchiveErrorKind::MemberRead {
                    member: format!("#{index}"),
                    message: e.to_string(),
                },
            )
        })?;
        let member_name = member.name().to_string();
        if member.is_dir() || !member_name.to_ascii_lowercase().ends_with(".reqif") {
            continue;
        }

        // Spool through the scratch directory; member names can collide on
        // basename, so the archive index disambiguates.
        let basename = Path::new(&member_name)
            .file_name()
            .map_or_else(|| member_name.clone(), |n| n.to_string_lossy().into_owned());
        let spool_path = scratch.path().join(format!("{index}-{basename}"));
        let read_member = (|| -> io::Result<String> {
            let mut out = File::create(&spool_path)?;
            io::copy(&mut member, &mut out)?;
            fs::read_to_string(&spool_path)
        })();

        match read_member {
            Ok(content) => {
                debug!(member = %member_name, bytes = content.len(), "extracted bundle member");
                documents.push(ExtractedDocument {
                    member_name,
                    content,
                });
            }
            Err(e) => {
                return Err(ReqifError::archive(
                    &display,
                    ArchiveErrorKind::MemberRead {
                        member: member_name,
                        message: e.to_string(),
                    },
                ));
            }
        }
    }

    if documents.is_empty() {
        return Err(ReqifError::archive(
            &display,
            ArchiveErrorKind::NoDocuments,
        ));
    }
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn write_bundle(members: &[(&str, &str)]) -> tempfile::NamedTempFile {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut writer = zip::ZipWriter::new(file.reopen().unwrap());
        for (name, content) in members {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
        file
    }

    #[test]
    fn extracts_reqif_members_in_archive_order() {
        let bundle = write_bundle(&[
            ("first.reqif", "<REQ-IF/>"),
            ("notes.txt", "ignore me"),
            ("second.reqif", "<REQ-IF/>"),
        ]);

        let docs = extract_documents(bundle.path()).unwrap();
        let names: Vec<_> = docs.iter().map(|d| d.member_name.as_str()).collect();
        assert_eq!(names, ["first.reqif", "second.reqif"]);
    }

    #[test]
    fn bundle_without_documents_is_an_archive_error() {
        let bundle = write_bundle(&[("readme.txt", "nothing here")]);

        let err = extract_documents(bundle.path()).unwrap_err();
        assert!(matches!(
            err,
            ReqifError::Archive {
                source: ArchiveErrorKind::NoDocuments,
                ..
            }
        ));
    }

    #[test]
    fn non_zip_input_is_an_archive_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"this is not a zip archive").unwrap();

        let err = extract_documents(file.path()).unwrap_err();
        assert!(matches!(
            err,
            ReqifError::Archive {
                source: ArchiveErrorKind::InvalidArchive(_),
                ..
            }
        ));
    }
}
