//! Style checking for PNG baseline images
//!
//! Expected-result images must carry an embedded checksum in a `tEXt`
//! chunk so the test harness can compare them cheaply. Images without
//! one were produced by hand and need regenerating.

use crate::Result;
use crate::models::StyleError;
use std::fs;
use std::path::Path;

const CHECKSUM_CHUNK: &[u8] = b"tEXtchecksum";

const MISSING_CHECKSUM_MESSAGE: &str =
    "Image lacks a checksum. Generate pngs using run-webkit-tests to ensure they have a checksum.";

/// Read access to checked files, so tests can run against in-memory data
pub trait FileReader {
    fn read_binary(&self, path: &Path) -> Result<Vec<u8>>;
}

/// [`FileReader`] backed by the real filesystem
#[derive(Debug, Default)]
pub struct OsFileReader;

impl FileReader for OsFileReader {
    fn read_binary(&self, path: &Path) -> Result<Vec<u8>> {
        Ok(fs::read(path)?)
    }
}

/// Checks one PNG file and reports style errors through a callback
pub struct PngChecker<'a, R: FileReader> {
    file_path: String,
    reader: &'a R,
}

impl<'a, R: FileReader> PngChecker<'a, R> {
    pub fn new(file_path: &str, reader: &'a R) -> Self {
        PngChecker { file_path: file_path.to_string(), reader }
    }

    #[must_use]
    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn check<F>(&self, mut handle_style_error: F) -> Result<()>
    where
        F: FnMut(StyleError),
    {
        if !self.file_path.ends_with("-expected.png") {
            return Ok(());
        }
        let data = self.reader.read_binary(Path::new(&self.file_path))?;
        if !contains_checksum(&data) {
            handle_style_error(StyleError {
                line_number: 0,
                category: "image/png".to_string(),
                confidence: 5,
                message: MISSING_CHECKSUM_MESSAGE.to_string(),
            });
        }
        Ok(())
    }
}

fn contains_checksum(data: &[u8]) -> bool {
    data.windows(CHECKSUM_CHUNK.len()).any(|w| w == CHECKSUM_CHUNK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    struct MockFileReader {
        files: BTreeMap<String, Vec<u8>>,
    }

    impl MockFileReader {
        fn new() -> Self {
            MockFileReader { files: BTreeMap::new() }
        }

        fn write_binary_file(&mut self, path: &str, data: &[u8]) {
            self.files.insert(path.to_string(), data.to_vec());
        }
    }

    impl FileReader for MockFileReader {
        fn read_binary(&self, path: &Path) -> Result<Vec<u8>> {
            self.files
                .get(&path.to_string_lossy().to_string())
                .cloned()
                .ok_or_else(|| {
                    crate::Error::Io(std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        path.display().to_string(),
                    ))
                })
        }
    }

    fn check_collecting(fs: &MockFileReader, path: &str) -> Vec<StyleError> {
        let mut errors = Vec::new();
        let checker = PngChecker::new(path, fs);
        checker.check(|e| errors.push(e)).unwrap();
        errors
    }

    #[test]
    fn remembers_its_file_path() {
        let fs = MockFileReader::new();
        let checker = PngChecker::new("test/config", &fs);
        assert_eq!(checker.file_path(), "test/config");
    }

    #[test]
    fn plain_png_is_not_checked() {
        let mut fs = MockFileReader::new();
        fs.write_binary_file("foo.png", b"Dummy binary data");
        assert_eq!(check_collecting(&fs, "foo.png").len(), 0);
    }

    #[test]
    fn expected_png_without_checksum_is_an_error() {
        let mut fs = MockFileReader::new();
        fs.write_binary_file("foo-expected.png", b"Dummy binary data");
        let errors = check_collecting(&fs, "foo-expected.png");
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0],
            StyleError {
                line_number: 0,
                category: "image/png".to_string(),
                confidence: 5,
                message: MISSING_CHECKSUM_MESSAGE.to_string(),
            }
        );
    }

    #[test]
    fn expected_png_with_checksum_passes() {
        let mut fs = MockFileReader::new();
        fs.write_binary_file(
            "foo-expected.png",
            b"\x89PNG\r\n\x1a\n....tEXtchecksum\x00abc123....",
        );
        assert_eq!(check_collecting(&fs, "foo-expected.png").len(), 0);
    }
}
