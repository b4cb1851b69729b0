use crate::error::{BlockError, BlockResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form key/value map carried by each override section.
pub type Fields = Map<String, Value>;

/// One placed, typed content unit in a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
    #[serde(default)]
    pub local_overrides: OverrideSet,
    /// Keys this crate does not interpret, kept so round-trips stay lossless.
    #[serde(flatten)]
    pub extra: Fields,
}

fn default_visible() -> bool {
    true
}

impl Block {
    pub fn new(id: impl Into<String>, block_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            block_type: block_type.into(),
            is_visible: true,
            local_overrides: OverrideSet::default(),
            extra: Fields::new(),
        }
    }

    pub fn with_overrides(mut self, overrides: OverrideSet) -> Self {
        self.local_overrides = overrides;
        self
    }

    /// First 8 characters of the id, as shown in diagnostics.
    pub fn short_id(&self) -> &str {
        match self.id.char_indices().nth(8) {
            Some((end, _)) => &self.id[..end],
            None => &self.id,
        }
    }
}

/// Block-local values that shadow role defaults and global tokens.
/// A missing section or key means "inherit", never "empty".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverrideSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Fields>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<Fields>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<Fields>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Fields>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Fields>,
    #[serde(flatten)]
    pub extra: Fields,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverrideSection {
    Data,
    Media,
    Style,
    Background,
    Layout,
}

impl OverrideSection {
    pub const ALL: [OverrideSection; 5] = [
        OverrideSection::Data,
        OverrideSection::Media,
        OverrideSection::Style,
        OverrideSection::Background,
        OverrideSection::Layout,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OverrideSection::Data => "data",
            OverrideSection::Media => "media",
            OverrideSection::Style => "style",
            OverrideSection::Background => "background",
            OverrideSection::Layout => "layout",
        }
    }

    pub fn parse(name: &str) -> BlockResult<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str() == name)
            .ok_or_else(|| BlockError::InvalidOverrideSection {
                section: name.to_string(),
                expected: Self::ALL
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

impl OverrideSet {
    pub fn section(&self, section: OverrideSection) -> Option<&Fields> {
        match section {
            OverrideSection::Data => self.data.as_ref(),
            OverrideSection::Media => self.media.as_ref(),
            OverrideSection::Style => self.style.as_ref(),
            OverrideSection::Background => self.background.as_ref(),
            OverrideSection::Layout => self.layout.as_ref(),
        }
    }

    pub fn section_mut(&mut self, section: OverrideSection) -> &mut Fields {
        let slot = match section {
            OverrideSection::Data => &mut self.data,
            OverrideSection::Media => &mut self.media,
            OverrideSection::Style => &mut self.style,
            OverrideSection::Background => &mut self.background,
            OverrideSection::Layout => &mut self.layout,
        };
        slot.get_or_insert_with(Fields::new)
    }

    /// Resolve a `section.key` path such as `data.title`.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let (section, key) = path.split_once('.')?;
        let section = OverrideSection::parse(section).ok()?;
        self.section(section)?.get(key)
    }

    pub fn get(&self, section: OverrideSection, key: &str) -> Option<&Value> {
        self.section(section)?.get(key)
    }

    /// String value of a key; non-string values are ignored.
    pub fn get_str(&self, section: OverrideSection, key: &str) -> Option<&str> {
        self.get(section, key).and_then(Value::as_str)
    }

    pub fn set(&mut self, section: OverrideSection, key: impl Into<String>, value: Value) {
        self.section_mut(section).insert(key.into(), value);
    }

    /// Removes a key; an emptied section is dropped so it inherits again.
    pub fn unset(&mut self, section: OverrideSection, key: &str) -> Option<Value> {
        let removed = self.section_mut(section).shift_remove(key);
        let slot = match section {
            OverrideSection::Data => &mut self.data,
            OverrideSection::Media => &mut self.media,
            OverrideSection::Style => &mut self.style,
            OverrideSection::Background => &mut self.background,
            OverrideSection::Layout => &mut self.layout,
        };
        if slot.as_ref().is_some_and(|f| f.is_empty()) {
            *slot = None;
        }
        removed
    }
}
