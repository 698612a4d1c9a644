//! The license record schema.
//!
//! Records are provisioned by hand into the remote JSON document and are
//! never deleted here. The only in-system mutation is activation, which
//! writes `status`, `bound_device` and `activated_at` exactly once.

use crate::error::{LicenseError, LicenseResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Scope sentinel accepted by every application.
pub const ALL_SCOPE: &str = "ALL";

/// Activation status of a record.
///
/// `USED` is read as a synonym of `ACTIVE`; activation always writes
/// `ACTIVE`. Anything else is kept verbatim so the validator can report it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordStatus {
    /// Provisioned but never used.
    Unused,
    /// Activated at least once.
    Active,
    /// A status string this system does not know.
    Unrecognized(String),
}

impl RecordStatus {
    /// Returns the wire spelling of this status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unused => "UNUSED",
            Self::Active => "ACTIVE",
            Self::Unrecognized(s) => s,
        }
    }
}

impl From<String> for RecordStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "UNUSED" => Self::Unused,
            "ACTIVE" | "USED" => Self::Active,
            _ => Self::Unrecognized(s),
        }
    }
}

impl From<RecordStatus> for String {
    fn from(status: RecordStatus) -> Self {
        match status {
            RecordStatus::Unrecognized(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which application(s) may accept a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Scope {
    /// Accepted by every application (`"ALL"`).
    All,
    /// Accepted only by the application with this identifier.
    App(String),
}

impl Scope {
    /// Returns true if an application identified by `app` may accept the key.
    #[must_use]
    pub fn admits(&self, app: &str) -> bool {
        match self {
            Self::All => true,
            Self::App(id) => id == app,
        }
    }
}

// A record without a scope is admitted nowhere.
impl Default for Scope {
    fn default() -> Self {
        Self::App(String::new())
    }
}

impl From<String> for Scope {
    fn from(s: String) -> Self {
        if s == ALL_SCOPE {
            Self::All
        } else {
            Self::App(s)
        }
    }
}

impl From<Scope> for String {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::All => ALL_SCOPE.to_string(),
            Scope::App(id) => id,
        }
    }
}

/// One license record, keyed by its license key in [`LicenseDb`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LicenseRecord {
    /// Activation status. `None` when the document omits it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
    /// Application scope.
    #[serde(default)]
    pub app_scope: Scope,
    /// Human-readable plan label.
    #[serde(default)]
    pub type_name: String,
    /// Device identifier bound at first activation.
    #[serde(default, alias = "bind_device", skip_serializing_if = "Option::is_none")]
    pub bound_device: Option<String>,
    /// Local wall-clock time of first activation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activated_at: Option<String>,
    /// Operator-provisioned fields this system does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LicenseRecord {
    /// Creates an unused record for the given scope and plan label.
    #[must_use]
    pub fn new(app_scope: Scope, type_name: impl Into<String>) -> Self {
        Self {
            status: Some(RecordStatus::Unused),
            app_scope,
            type_name: type_name.into(),
            bound_device: None,
            activated_at: None,
            extra: Map::new(),
        }
    }

    /// Returns the record with its status replaced.
    #[must_use]
    pub fn with_status(mut self, status: RecordStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns true if the record has been activated.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.status, Some(RecordStatus::Active))
    }
}

/// One document entry: a record, or a value that does not parse as one.
///
/// A malformed entry is kept verbatim so a write-back does not destroy it,
/// and only lookups of that key fail.
#[derive(Debug, Clone, PartialEq)]
enum Entry {
    Record(LicenseRecord),
    Malformed { raw: Value, reason: String },
}

impl Entry {
    fn parse(raw: Value) -> Self {
        match LicenseRecord::deserialize(&raw) {
            Ok(record) => Self::Record(record),
            Err(e) => Self::Malformed {
                raw,
                reason: e.to_string(),
            },
        }
    }
}

impl Serialize for Entry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Record(record) => record.serialize(serializer),
            Self::Malformed { raw, .. } => raw.serialize(serializer),
        }
    }
}

/// Snapshot of the whole record document.
///
/// Records are parsed one by one: an entry that is not a valid record does
/// not make the rest of the document unreadable.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LicenseDb {
    records: BTreeMap<String, Entry>,
}

impl<'de> Deserialize<'de> for LicenseDb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        Ok(Self {
            records: raw
                .into_iter()
                .map(|(key, value)| (key, Entry::parse(value)))
                .collect(),
        })
    }
}

impl LicenseDb {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a document from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a JSON object. Individual entries
    /// that are not valid records do not fail the parse.
    pub fn from_json(text: &str) -> LicenseResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serializes the document the way it is written back to the store.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_pretty_json(&self) -> LicenseResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Looks up a well-formed record. Keys are case-sensitive.
    ///
    /// Returns `None` for a malformed entry too; use [`lookup`](Self::lookup)
    /// to tell the two apart.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&LicenseRecord> {
        match self.records.get(key)? {
            Entry::Record(record) => Some(record),
            Entry::Malformed { .. } => None,
        }
    }

    /// Looks up the record for `key`.
    ///
    /// # Errors
    ///
    /// `KeyNotFound` if the key is absent, `RecordCorrupt` if its entry is
    /// not a valid record.
    pub fn lookup(&self, key: &str) -> LicenseResult<&LicenseRecord> {
        match self.records.get(key) {
            Some(Entry::Record(record)) => Ok(record),
            Some(Entry::Malformed { reason, .. }) => Err(LicenseError::RecordCorrupt(reason.clone())),
            None => Err(LicenseError::KeyNotFound),
        }
    }

    pub(crate) fn lookup_mut(&mut self, key: &str) -> LicenseResult<&mut LicenseRecord> {
        match self.records.get_mut(key) {
            Some(Entry::Record(record)) => Ok(record),
            Some(Entry::Malformed { reason, .. }) => Err(LicenseError::RecordCorrupt(reason.clone())),
            None => Err(LicenseError::KeyNotFound),
        }
    }

    /// Inserts or replaces a record (provisioning helper).
    pub fn insert(&mut self, key: impl Into<String>, record: LicenseRecord) {
        self.records.insert(key.into(), Entry::Record(record));
    }

    /// Removes an entry (revocation). Returns true if the key was present.
    pub fn remove(&mut self, key: &str) -> bool {
        self.records.remove(key).is_some()
    }

    /// Returns true if the key is present, well-formed or not.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    /// Number of entries, including malformed ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the document holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates well-formed records in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LicenseRecord)> {
        self.records.iter().filter_map(|(k, entry)| match entry {
            Entry::Record(record) => Some((k.as_str(), record)),
            Entry::Malformed { .. } => None,
        })
    }

    /// Keys whose entries are not valid records.
    pub fn malformed_keys(&self) -> impl Iterator<Item = &str> {
        self.records
            .iter()
            .filter(|(_, entry)| matches!(entry, Entry::Malformed { .. }))
            .map(|(k, _)| k.as_str())
    }
}

impl FromIterator<(String, LicenseRecord)> for LicenseDb {
    fn from_iter<I: IntoIterator<Item = (String, LicenseRecord)>>(iter: I) -> Self {
        Self {
            records: iter
                .into_iter()
                .map(|(key, record)| (key, Entry::Record(record)))
                .collect(),
        }
    }
}
