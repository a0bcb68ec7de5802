use crate::error::Error;
use iris_core::{is_duplicate, Gallery, GalleryEntry, IrisCode};
use rusqlite::{
    params, types::Type, Connection, ErrorCode, OptionalExtension, Row, TransactionBehavior,
};
use std::{
    path::Path,
    time::{SystemTime, UNIX_EPOCH},
};

pub type SubjectId = i64;

const RECORD_COLUMNS: &str = "id, subject, code, bits, image_path, enrolled_at";

#[derive(Clone, Debug, PartialEq)]
pub struct EnrollmentRecord {
    pub id: i64,
    pub subject: SubjectId,
    pub code: IrisCode,
    /// Where the enrolled image was stored, if the caller kept it
    pub image_path: Option<String>,
    /// Seconds since the Unix epoch
    pub enrolled_at: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GalleryStats {
    pub total_records: usize,
    /// Distinct code lengths present, ascending
    pub code_lengths: Vec<usize>,
}

/// Enrolled iris codes in a SQLite database.
///
/// Codes are stored packed together with their bit length. Row order is
/// enrollment order, which is the scan order for identification.
pub struct GalleryStore {
    conn: Connection,
}

fn open_database(database_file: &Path) -> Result<Connection, Error> {
    let conn = Connection::open(database_file)?;
    conn.busy_timeout(std::time::Duration::from_secs(5))?;
    Ok(conn)
}

fn read_code(row: &Row<'_>, bytes_idx: usize, bits_idx: usize) -> rusqlite::Result<IrisCode> {
    let bytes = row.get::<_, Vec<u8>>(bytes_idx)?;
    let bits = row.get::<_, i64>(bits_idx)?;
    let bits = usize::try_from(bits).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(bits_idx, Type::Integer, Box::new(e))
    })?;
    IrisCode::from_bytes(&bytes, bits)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(bytes_idx, Type::Blob, Box::new(e)))
}

fn read_record(row: &Row<'_>) -> rusqlite::Result<EnrollmentRecord> {
    Ok(EnrollmentRecord {
        id: row.get(0)?,
        subject: row.get(1)?,
        code: read_code(row, 2, 3)?,
        image_path: row.get(4)?,
        enrolled_at: row.get(5)?,
    })
}

fn read_gallery(conn: &Connection) -> Result<Gallery<SubjectId>, Error> {
    let mut stmt = conn.prepare("SELECT subject, code, bits FROM iris_codes ORDER BY id;")?;
    let entries = stmt
        .query_map([], |row| {
            Ok(GalleryEntry {
                subject: row.get(0)?,
                code: read_code(row, 1, 2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(Gallery::from_entries(entries))
}

fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

/// UNIQUE violations that slipped past the checks, e.g. a writer that does
/// not go through this store.
fn map_insert_error(err: rusqlite::Error, subject: SubjectId) -> Error {
    match &err {
        rusqlite::Error::SqliteFailure(e, msg) if e.code == ErrorCode::ConstraintViolation => {
            if msg
                .as_deref()
                .is_some_and(|m| m.contains("iris_codes.subject"))
            {
                Error::SubjectAlreadyEnrolled(subject)
            } else {
                iris_core::Error::DuplicateIrisError.into()
            }
        }
        _ => err.into(),
    }
}

impl GalleryStore {
    pub fn open(database_file: &Path) -> Result<Self, Error> {
        Self::with_connection(open_database(database_file)?)
    }

    pub fn open_in_memory() -> Result<Self, Error> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, Error> {
        // Create the table if it doesn't exist
        conn.execute(
            "CREATE TABLE IF NOT EXISTS iris_codes (
                id INTEGER PRIMARY KEY,
                subject INTEGER NOT NULL UNIQUE,
                code BLOB NOT NULL,
                bits INTEGER NOT NULL,
                image_path TEXT,
                enrolled_at INTEGER NOT NULL,
                UNIQUE (code, bits)
            )",
            rusqlite::params![],
        )?;
        Ok(Self { conn })
    }

    /// Admits `code` for `subject` unless the subject is already enrolled or
    /// the exact code is enrolled for anyone.
    ///
    /// Check and insert run in one immediate transaction, so concurrent
    /// writers on the same database file are serialized.
    pub fn enroll(
        &mut self,
        subject: SubjectId,
        code: &IrisCode,
        image_path: Option<&str>,
    ) -> Result<EnrollmentRecord, Error> {
        let transaction = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let gallery = read_gallery(&transaction)?;
        if gallery.code_of(&subject).is_some() {
            return Err(Error::SubjectAlreadyEnrolled(subject));
        }
        if is_duplicate(code, &gallery) {
            return Err(iris_core::Error::DuplicateIrisError.into());
        }

        let enrolled_at = now();
        transaction
            .execute(
                "INSERT INTO iris_codes (subject, code, bits, image_path, enrolled_at) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![subject, code.to_bytes(), code.len() as i64, image_path, enrolled_at],
            )
            .map_err(|e| map_insert_error(e, subject))?;
        let id = transaction.last_insert_rowid();
        transaction.commit()?;

        Ok(EnrollmentRecord {
            id,
            subject,
            code: code.clone(),
            image_path: image_path.map(str::to_owned),
            enrolled_at,
        })
    }

    pub fn gallery(&self) -> Result<Gallery<SubjectId>, Error> {
        read_gallery(&self.conn)
    }

    pub fn records(&self) -> Result<Vec<EnrollmentRecord>, Error> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {RECORD_COLUMNS} FROM iris_codes ORDER BY id;"))?;
        let records = stmt
            .query_map([], read_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    pub fn record(&self, subject: SubjectId) -> Result<Option<EnrollmentRecord>, Error> {
        let record = self
            .conn
            .query_row(
                &format!("SELECT {RECORD_COLUMNS} FROM iris_codes WHERE subject = ?1;"),
                [subject],
                read_record,
            )
            .optional()?;
        Ok(record)
    }

    pub fn count(&self) -> Result<usize, Error> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM iris_codes;", [], |row| {
                row.get::<_, i64>(0)
            })?;
        Ok(count as usize)
    }

    pub fn stats(&self) -> Result<GalleryStats, Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT bits FROM iris_codes ORDER BY bits;")?;
        let code_lengths = stmt
            .query_map([], |row| row.get::<_, i64>(0))?
            .map(|bits| bits.map(|b| b as usize))
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(GalleryStats {
            total_records: self.count()?,
            code_lengths,
        })
    }
}
