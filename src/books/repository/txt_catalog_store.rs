use std::ffi::OsString;
use std::fs;
use std::fs::{File, OpenOptions};
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::books::domain::Book;
use crate::books::domain::catalog::Catalog;
use crate::books::domain::model::BookEntity;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::CatalogStore;

pub const FIELD_SEPARATOR: char = '|';
const FIELD_COUNT: usize = 5;
const TEMP_SUFFIX: &str = ".tmp";

// TxtCatalogStore keeps the catalog in one flat file, one record per line:
//
//     ISBN|TITLE|AUTHOR|TOTAL|BORROWED
//
// A save never edits the file in place. The new content goes to a sibling temp
// file which is synced and then renamed over the original, so a reader opening
// the path sees either the old file or the new one.
#[derive(Debug, Clone)]
pub struct TxtCatalogStore {
    path: PathBuf,
}

impl TxtCatalogStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    // temp_path sits in the same directory so the final rename never crosses filesystems
    pub fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(OsString::from).unwrap_or_default();
        name.push(TEMP_SUFFIX);
        self.path.with_file_name(name)
    }

    // stage writes and syncs the full new content to the temp file. Nothing is
    // visible at the catalog path until commit.
    pub fn stage(&self, catalog: &Catalog) -> LibraryResult<PathBuf> {
        let tmp = self.temp_path();
        let content = encode(catalog);
        let written = create_parent(&self.path).and_then(|_| {
            let mut file = File::create(&tmp)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()
        });
        if let Err(err) = written {
            let _ = fs::remove_file(&tmp);
            tracing::error!(path = %tmp.display(), "failed to write temp catalog: {}", err);
            return Err(LibraryError::persistence(
                format!("writing {}: {}", tmp.display(), err).as_str()));
        }
        Ok(tmp)
    }

    // commit atomically replaces the catalog file with a staged temp file.
    pub fn commit(&self, staged: &Path) -> LibraryResult<()> {
        if let Err(err) = fs::rename(staged, &self.path) {
            tracing::error!(path = %self.path.display(), "failed to replace catalog: {}", err);
            return Err(LibraryError::persistence(
                format!("renaming {} over {}: {}", staged.display(), self.path.display(), err).as_str()));
        }
        // the rename already happened; a failed directory sync only weakens durability
        if let Err(err) = sync_parent(&self.path) {
            tracing::warn!(path = %self.path.display(), "could not sync catalog directory: {}", err);
        }
        Ok(())
    }

    fn ensure_file(&self) -> LibraryResult<()> {
        if self.path.exists() {
            return Ok(());
        }
        create_parent(&self.path)?;
        match OpenOptions::new().write(true).create_new(true).open(&self.path) {
            Ok(_) => {
                tracing::info!(path = %self.path.display(), "created empty catalog file");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => Ok(()),
            Err(err) => Err(LibraryError::from(err)),
        }
    }
}

impl CatalogStore for TxtCatalogStore {
    fn load(&self) -> LibraryResult<Catalog> {
        self.ensure_file()?;
        let bytes = fs::read(&self.path)?;
        let content = String::from_utf8(bytes).map_err(|err| {
            let valid = &err.as_bytes()[..err.utf8_error().valid_up_to()];
            let line = valid.iter().filter(|b| **b == b'\n').count() + 1;
            LibraryError::corrupt_record("record is not valid UTF-8", line)
        })?;
        decode(content.as_str()).map_err(|err| {
            tracing::error!(path = %self.path.display(), "catalog failed to load: {}", err);
            err
        })
    }

    fn save(&self, catalog: &Catalog) -> LibraryResult<()> {
        let staged = self.stage(catalog)?;
        self.commit(staged.as_path())?;
        tracing::debug!(path = %self.path.display(), records = catalog.len(), "catalog saved");
        Ok(())
    }
}

// decode_line parses one non-blank record line, or says why it cannot.
pub fn decode_line(line: &str) -> Result<BookEntity, String> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).map(str::trim).collect();
    if fields.len() != FIELD_COUNT {
        return Err(format!("expected {} fields, found {}", FIELD_COUNT, fields.len()));
    }
    let total = parse_count("total", fields[3])?;
    let borrowed = parse_count("borrowed", fields[4])?;
    BookEntity::new(fields[0], fields[1], fields[2], total, borrowed)
}

fn parse_count(name: &str, field: &str) -> Result<u32, String> {
    // u32::from_str would accept a leading '+'
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("{} {:?} is not a non-negative integer", name, field));
    }
    field.parse::<u32>().map_err(|err| format!("{} {:?}: {}", name, field, err))
}

pub fn encode_line(book: &BookEntity) -> String {
    let sep = FIELD_SEPARATOR;
    format!("{}{sep}{}{sep}{}{sep}{}{sep}{}", book.isbn(), book.title(), book.author(),
            book.total_copies(), book.borrowed_copies())
}

// decode rejects the whole content on the first bad line; blank lines are skipped.
pub fn decode(content: &str) -> LibraryResult<Catalog> {
    let mut catalog = Catalog::new();
    for (ndx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let book = decode_line(line)
            .map_err(|reason| LibraryError::corrupt_record(reason.as_str(), ndx + 1))?;
        let isbn = book.isbn().to_string();
        if !catalog.push(book) {
            return Err(LibraryError::corrupt_record(
                format!("duplicate isbn {}", isbn).as_str(), ndx + 1));
        }
    }
    Ok(catalog)
}

pub fn encode(catalog: &Catalog) -> String {
    catalog.iter().map(|book| encode_line(book) + "\n").collect()
}

fn create_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

#[cfg(unix)]
fn sync_parent(path: &Path) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    File::open(parent)?.sync_all()
}

#[cfg(not(unix))]
fn sync_parent(_path: &Path) -> io::Result<()> {
    Ok(())
}
