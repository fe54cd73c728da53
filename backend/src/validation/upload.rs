use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::ops::{Deref, DerefMut};

use log::error;

/// An uploaded file spooled to a temporary file.
pub struct Upload {
    filename: String,
    file: File,
}

impl Upload {
    pub fn new(filename: impl Into<String>, file: File) -> Self {
        Self {
            filename: filename.into(),
            file,
        }
    }

    #[cfg(test)]
    pub fn from_bytes(filename: impl Into<String>, bytes: &[u8]) -> io::Result<Self> {
        use std::io::Write;

        let mut file = tempfile::tempfile()?;
        file.write_all(bytes)?;
        file.seek(SeekFrom::Start(0))?;
        Ok(Self::new(filename, file))
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Lower-cased extension, without the dot.
    pub fn extension(&self) -> Option<String> {
        self.filename
            .rsplit_once('.')
            .map(|(_, extension)| extension.to_lowercase())
            .filter(|extension| !extension.is_empty())
    }

    pub fn size(&self) -> io::Result<u64> {
        Ok(self.file.metadata()?.len())
    }

    /// Positions the file at the start and puts it back there when the
    /// guard is dropped, so the next reader sees the whole file.
    pub fn rewound(&mut self) -> io::Result<Rewind<'_>> {
        self.file.seek(SeekFrom::Start(0))?;
        Ok(Rewind { upload: self })
    }

    pub fn read_all(&mut self) -> io::Result<Vec<u8>> {
        let mut guard = self.rewound()?;
        let mut buffer = Vec::new();
        guard.read_to_end(&mut buffer)?;
        Ok(buffer)
    }
}

impl Read for Upload {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl Seek for Upload {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.file.seek(pos)
    }
}

impl std::fmt::Debug for Upload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Upload").field("filename", &self.filename).finish()
    }
}

pub struct Rewind<'a> {
    upload: &'a mut Upload,
}

impl Deref for Rewind<'_> {
    type Target = Upload;

    fn deref(&self) -> &Upload {
        self.upload
    }
}

impl DerefMut for Rewind<'_> {
    fn deref_mut(&mut self) -> &mut Upload {
        self.upload
    }
}

impl Drop for Rewind<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.upload.file.seek(SeekFrom::Start(0)) {
            error!("Could not rewind upload {}: {}", self.upload.filename, e);
        }
    }
}
