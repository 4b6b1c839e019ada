//! Flat-file store for memories, emotion records and the today-word.
//!
//! ## Layout
//!
//! ```text
//! data/
//! ├── memories.json     # Memory rows, insertion order
//! ├── emotions.json     # EmotionRecord rows, one per date
//! ├── today_word.json   # TodayWord singleton
//! └── images/           # Uploaded photos
//! ```
//!
//! Reads never fail: a missing or malformed table reads as empty. Writes
//! read the whole table, modify it in memory and write it back; failures
//! surface as [`Error::Storage`](crate::Error::Storage).
//!
//! ## Usage
//!
//! ```ignore
//! use heartlog_core::{NewMemory, Store};
//!
//! let store = Store::open("data")?;
//! let memory = store.append_memory(NewMemory {
//!     title: "첫 데이트".into(),
//!     content: transcript,
//!     summary, emotion, empathy,
//!     image: None,
//! })?;
//!
//! let recent = store.load_recent_memories(3);
//! ```

pub mod image;
mod table;

use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::time::today;
use crate::types::{EmotionRecord, Memory, NewMemory, TodayWord};

/// Reason recorded on emotion rows derived from a saved conversation.
pub const CONVERSATION_EMOTION_REASON: &str = "대화 기반 감정 분석";

const MEMORIES_FILE: &str = "memories.json";
const EMOTIONS_FILE: &str = "emotions.json";
const TODAY_WORD_FILE: &str = "today_word.json";

/// Flat-file store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct Store {
    data_dir: PathBuf,
}

impl Store {
    /// Create a store without touching the filesystem.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Create a store and initialize its files.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let store = Self::new(data_dir);
        store.initialize()?;
        Ok(store)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn memories_path(&self) -> PathBuf {
        self.data_dir.join(MEMORIES_FILE)
    }

    fn emotions_path(&self) -> PathBuf {
        self.data_dir.join(EMOTIONS_FILE)
    }

    fn today_word_path(&self) -> PathBuf {
        self.data_dir.join(TODAY_WORD_FILE)
    }

    fn images_dir(&self) -> PathBuf {
        self.data_dir.join(image::IMAGES_DIR)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Initialization
    // ─────────────────────────────────────────────────────────────────────────────

    /// Ensure the data directory, images/ and the three files exist.
    ///
    /// Idempotent; existing files are never modified.
    pub fn initialize(&self) -> Result<()> {
        let images_dir = self.images_dir();
        std::fs::create_dir_all(&images_dir).map_err(|e| Error::storage(&images_dir, e))?;

        let memories = self.memories_path();
        if !memories.exists() {
            table::write::<Memory>(&memories, &[])?;
        }

        let emotions = self.emotions_path();
        if !emotions.exists() {
            table::write::<EmotionRecord>(&emotions, &[])?;
        }

        let today_word = self.today_word_path();
        if !today_word.exists() {
            table::write_json(&today_word, &TodayWord::empty())?;
        }

        Ok(())
    }

    /// Initialize before a read; a failure only degrades the read.
    fn initialize_for_read(&self) {
        if let Err(e) = self.initialize() {
            warn!(data_dir = %self.data_dir.display(), error = %e, "Store initialization failed");
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Write Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Append a memory dated today.
    ///
    /// Also records the memory's emotion as the day's emotion record.
    pub fn append_memory(&self, new: NewMemory) -> Result<Memory> {
        self.append_memory_on(today(), new)
    }

    /// Append a memory with an explicit date.
    pub fn append_memory_on(&self, date: NaiveDate, new: NewMemory) -> Result<Memory> {
        self.initialize()?;

        // A malformed table fails the save before the photo is written
        let path = self.memories_path();
        let mut memories: Vec<Memory> = table::read_strict(&path)?;

        let image_path = match new.image.as_deref() {
            Some(bytes) if !bytes.is_empty() => Some(self.store_image(date, &new.title, bytes)?),
            _ => None,
        };

        let memory = Memory {
            date,
            title: new.title,
            content: new.content,
            summary: new.summary,
            emotion: new.emotion,
            empathy: new.empathy,
            image_path,
        };

        memories.push(memory.clone());
        table::write(&path, &memories)?;

        info!(date = %date, title = %memory.title, "Memory saved");

        self.upsert_emotion(date, &memory.emotion, CONVERSATION_EMOTION_REASON)?;

        Ok(memory)
    }

    fn store_image(&self, date: NaiveDate, title: &str, bytes: &[u8]) -> Result<String> {
        let relative = image::relative_image_path(date, title, bytes);
        let path = self.data_dir.join(&relative);
        std::fs::write(&path, bytes).map_err(|e| Error::storage(&path, e))?;
        debug!(path = %relative, size = bytes.len(), "Image stored");
        Ok(relative)
    }

    /// Record the emotion for a day, replacing any earlier record for it.
    pub fn upsert_emotion(&self, date: NaiveDate, emotion: &str, reason: &str) -> Result<()> {
        self.initialize()?;

        let path = self.emotions_path();
        let mut emotions: Vec<EmotionRecord> = table::read_strict(&path)?;

        match emotions.iter_mut().find(|r| r.date == date) {
            Some(existing) => {
                existing.emotion = emotion.to_string();
                existing.reason = reason.to_string();
                debug!(date = %date, "Emotion record replaced");
            }
            None => {
                emotions.push(EmotionRecord {
                    date,
                    emotion: emotion.to_string(),
                    reason: reason.to_string(),
                });
                debug!(date = %date, "Emotion record added");
            }
        }

        table::write(&path, &emotions)
    }

    /// Overwrite the today-word singleton.
    pub fn save_today_word(&self, word: &str) -> Result<TodayWord> {
        self.initialize()?;

        let today_word = TodayWord {
            date: today(),
            word: word.to_string(),
        };
        table::write_json(&self.today_word_path(), &today_word)?;
        Ok(today_word)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Read Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// The today-word singleton, or `{today, ""}` when unavailable.
    pub fn load_today_word(&self) -> TodayWord {
        self.initialize_for_read();

        let path = self.today_word_path();
        std::fs::read_to_string(&path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_else(TodayWord::empty)
    }

    /// All memories, most recent date first.
    ///
    /// Memories sharing a date are returned newest-saved first.
    pub fn load_all_memories(&self) -> Vec<Memory> {
        self.initialize_for_read();

        let mut memories: Vec<Memory> =
            table::read_lenient(&self.memories_path()).unwrap_or_default();
        memories.reverse();
        memories.sort_by(|a, b| b.date.cmp(&a.date));
        memories
    }

    /// The first `n` of [`load_all_memories`](Self::load_all_memories).
    pub fn load_recent_memories(&self, n: usize) -> Vec<Memory> {
        let mut memories = self.load_all_memories();
        memories.truncate(n);
        memories
    }

    /// Memories saved on exactly `date`.
    pub fn load_memories_by_date(&self, date: NaiveDate) -> Vec<Memory> {
        self.load_all_memories()
            .into_iter()
            .filter(|m| m.date == date)
            .collect()
    }

    /// All emotion records, oldest date first.
    pub fn load_all_emotions(&self) -> Vec<EmotionRecord> {
        self.initialize_for_read();

        let mut emotions: Vec<EmotionRecord> =
            table::read_lenient(&self.emotions_path()).unwrap_or_default();
        emotions.sort_by(|a, b| a.date.cmp(&b.date));
        emotions
    }

    /// Bytes of a stored photo, or `None` if the path is empty or unreadable.
    pub fn load_image(&self, relative: Option<&str>) -> Option<Vec<u8>> {
        let path = image::resolve(&self.data_dir, relative?)?;
        match std::fs::read(&path) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Image unavailable");
                None
            }
        }
    }
}

impl TodayWord {
    /// `{today, ""}`
    pub fn empty() -> Self {
        Self {
            date: today(),
            word: String::new(),
        }
    }
}
