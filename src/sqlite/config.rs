use bitflags::bitflags;
use rusqlite::OpenFlags;

bitflags! {
    /// How to open a SQLite database, mirrored onto the native open flags.
    ///
    /// The default is read-write, creating the file if missing.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct OpenMode: u32 {
        const READ_ONLY = 1 << 0;
        const READ_WRITE = 1 << 1;
        const CREATE = 1 << 2;
        /// Pure in-memory database, regardless of the path.
        const MEMORY = 1 << 3;
        /// Skip the native mutexes; the caller guarantees single-threaded use.
        const NO_MUTEX = 1 << 4;
        /// Serialise every native call on an internal mutex.
        const FULL_MUTEX = 1 << 5;
        /// Refuse to open symlinked database files.
        const NO_SYMLINK = 1 << 6;
    }
}

impl Default for OpenMode {
    fn default() -> Self {
        OpenMode::READ_WRITE | OpenMode::CREATE
    }
}

/// Connection parameters for [`super::SqliteConnection`].
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// Database filename, or `:memory:`.
    pub path: String,
    pub mode: OpenMode,
}

impl SqliteConfig {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mode: OpenMode::default(),
        }
    }

    /// A private in-memory database.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            path: ":memory:".to_string(),
            mode: OpenMode::default() | OpenMode::MEMORY,
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: OpenMode) -> Self {
        self.mode = mode;
        self
    }

    /// Translate to the native flag set. Extended result codes are always
    /// requested so driver errors carry the detailed code.
    pub(crate) fn open_flags(&self) -> OpenFlags {
        let mut flags = OpenFlags::SQLITE_OPEN_EXRESCODE | OpenFlags::SQLITE_OPEN_URI;
        if self.mode.contains(OpenMode::READ_ONLY) {
            flags |= OpenFlags::SQLITE_OPEN_READ_ONLY;
        }
        if self.mode.contains(OpenMode::READ_WRITE) {
            flags |= OpenFlags::SQLITE_OPEN_READ_WRITE;
        }
        if self.mode.contains(OpenMode::CREATE) {
            flags |= OpenFlags::SQLITE_OPEN_CREATE;
        }
        if self.mode.contains(OpenMode::MEMORY) {
            flags |= OpenFlags::SQLITE_OPEN_MEMORY;
        }
        if self.mode.contains(OpenMode::NO_MUTEX) {
            flags |= OpenFlags::SQLITE_OPEN_NO_MUTEX;
        }
        if self.mode.contains(OpenMode::FULL_MUTEX) {
            flags |= OpenFlags::SQLITE_OPEN_FULL_MUTEX;
        }
        if self.mode.contains(OpenMode::NO_SYMLINK) {
            flags |= OpenFlags::SQLITE_OPEN_NOFOLLOW;
        }
        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mode_is_read_write_create() {
        let flags = SqliteConfig::new("test.db").open_flags();
        assert!(flags.contains(OpenFlags::SQLITE_OPEN_READ_WRITE));
        assert!(flags.contains(OpenFlags::SQLITE_OPEN_CREATE));
        assert!(flags.contains(OpenFlags::SQLITE_OPEN_EXRESCODE));
        assert!(!flags.contains(OpenFlags::SQLITE_OPEN_READ_ONLY));
    }

    #[test]
    fn memory_mode_maps_through() {
        let flags = SqliteConfig::in_memory().open_flags();
        assert!(flags.contains(OpenFlags::SQLITE_OPEN_MEMORY));
    }
}
