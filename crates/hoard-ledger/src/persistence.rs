//! Save files.
//!
//! A ledger is stored as three files in its save directory:
//!
//! - `save_{location}_{name}.sav`: account records (Bank, Store, Pot, then
//!   users), two blank lines, then the history, one entry per line.
//! - `Items_{location}_{name}.csv`: the item library as `name,value,` lines.
//! - `config_save_{location}_{name}.sav`: the four locks as `True`/`False`.
//!
//! Every file is written to a temporary sibling and renamed into place.

use std::fs;
use std::path::{Path, PathBuf};

use hoard_core::{Account, ItemLibrary};
use tracing::{info, warn};

use crate::config::{LedgerConfig, LockState};
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;

const SECTION_BREAK: &str = "\n\n\n";
const RESERVED_ORDER: [&str; 3] = ["Bank", "Store", "Pot"];

/// Snapshot file name for a ledger.
pub fn save_file_name(location: &str, name: &str) -> String {
    format!("save_{location}_{name}.sav")
}

/// Item-library file name derived from a snapshot file name.
pub fn items_file_name(save_file: &str) -> String {
    let stem = save_file.strip_prefix("save_").unwrap_or(save_file);
    let stem = stem.strip_suffix(".sav").unwrap_or(stem);
    format!("Items_{stem}.csv")
}

/// Lock config file name derived from a snapshot file name.
pub fn config_file_name(save_file: &str) -> String {
    format!("config_{save_file}")
}

fn write_atomic(path: &Path, contents: &str) -> LedgerResult<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let io = |source| LedgerError::Io {
        path: path.to_path_buf(),
        source,
    };
    fs::write(&tmp, contents).map_err(io)?;
    fs::rename(&tmp, path).map_err(io)
}

fn read(path: &Path) -> LedgerResult<String> {
    fs::read_to_string(path).map_err(|source| LedgerError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn corrupt(path: &Path, message: impl Into<String>) -> LedgerError {
    LedgerError::Corrupt {
        path: path.to_path_buf(),
        message: message.into(),
    }
}

impl Ledger {
    /// Path of the snapshot file.
    pub fn save_path(&self) -> PathBuf {
        self.save_dir
            .join(save_file_name(&self.location, &self.name))
    }

    /// Path of the item-library file.
    pub fn items_path(&self) -> PathBuf {
        self.save_dir.join(items_file_name(&save_file_name(
            &self.location,
            &self.name,
        )))
    }

    /// Path of the lock config file.
    pub fn config_path(&self) -> PathBuf {
        self.save_dir.join(config_file_name(&save_file_name(
            &self.location,
            &self.name,
        )))
    }

    /// The snapshot file contents.
    pub fn snapshot(&self) -> String {
        let records: Vec<String> = self.all_accounts().map(Account::to_record).collect();
        format!(
            "{}{SECTION_BREAK}{}",
            records.join("\n"),
            self.history.join("\n")
        )
    }

    /// Write the snapshot, item library and lock config.
    pub fn save(&self) -> LedgerResult<()> {
        fs::create_dir_all(&self.save_dir).map_err(|source| LedgerError::Io {
            path: self.save_dir.clone(),
            source,
        })?;
        write_atomic(&self.save_path(), &self.snapshot())?;
        write_atomic(&self.items_path(), &self.library.to_table())?;
        write_atomic(&self.config_path(), &self.locks.to_config())?;
        info!(
            location = %self.location,
            ledger = %self.name,
            path = %self.save_path().display(),
            users = self.users.len(),
            "ledger saved"
        );
        Ok(())
    }

    /// Replace accounts, history and item library with the saved ones.
    ///
    /// Item-library lines that cannot be read are skipped and returned.
    /// Nothing is replaced unless both files load.
    pub fn load_save(&mut self) -> LedgerResult<Vec<String>> {
        let path = self.save_path();
        let text = read(&path)?;
        let (accounts, history) = text
            .split_once(SECTION_BREAK)
            .ok_or_else(|| corrupt(&path, "missing section break"))?;

        let mut records = accounts
            .lines()
            .map(Account::from_record)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| corrupt(&path, e.to_string()))?;
        if records.len() < RESERVED_ORDER.len() {
            return Err(corrupt(&path, "missing Bank, Store or Pot record"));
        }
        for (record, expected) in records.iter().zip(RESERVED_ORDER) {
            if record.name != expected {
                return Err(corrupt(
                    &path,
                    format!("expected {expected} record, found {:?}", record.name),
                ));
            }
        }
        let users = records.split_off(RESERVED_ORDER.len());
        let [bank, store, pot]: [Account; 3] = records
            .try_into()
            .map_err(|_| corrupt(&path, "missing Bank, Store or Pot record"))?;

        let items_path = self.items_path();
        let (library, rejected) = ItemLibrary::from_table(&read(&items_path)?);
        for line in &rejected {
            warn!(path = %items_path.display(), line = %line, "skipping malformed item line");
        }

        self.bank = bank;
        self.store = store;
        self.pot = pot;
        self.users = users;
        self.library = library;
        self.history = history.lines().map(str::to_string).collect();
        info!(
            location = %self.location,
            ledger = %self.name,
            users = self.users.len(),
            history = self.history.len(),
            "ledger loaded"
        );
        Ok(rejected)
    }

    /// Replace the lock state with the saved one.
    pub fn load_config(&mut self) -> LedgerResult<()> {
        let path = self.config_path();
        self.locks = LockState::from_config(&read(&path)?).map_err(|m| corrupt(&path, m))?;
        Ok(())
    }

    /// Rebuild a ledger from its save files alone. The admin identity and
    /// keys come from the saved Bank and Store records.
    pub fn load(dir: impl Into<PathBuf>, location: &str, name: &str) -> LedgerResult<Self> {
        let config = LedgerConfig::new(location, "", "")
            .with_name(name)
            .with_save_dir(dir);
        let mut ledger = Ledger::new(config);
        ledger.load_save()?;
        ledger.load_config()?;
        Ok(ledger)
    }
}
