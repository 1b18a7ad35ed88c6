use serde::{Deserialize, Serialize};

/// A document stored in the knowledge base
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub original_filename: String,
    /// Kept as the raw server string; see [`Category::parse`].
    pub category: String,
    /// Bytes
    pub file_size: u64,
    pub is_processed: bool,
    #[serde(default)]
    pub chunk_count: u32,
    pub uploaded_at: String,
}

impl Document {
    pub fn category(&self) -> Category {
        Category::parse(&self.category)
    }
}

/// Knowledge-base category a document is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    #[default]
    General,
    Admissions,
    Academics,
    StudentLife,
    Policies,
    Financial,
}

impl Category {
    pub fn all() -> &'static [Category] {
        &[
            Category::General,
            Category::Admissions,
            Category::Academics,
            Category::StudentLife,
            Category::Policies,
            Category::Financial,
        ]
    }

    /// Wire value sent in the upload form
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Admissions => "admissions",
            Category::Academics => "academics",
            Category::StudentLife => "student-life",
            Category::Policies => "policies",
            Category::Financial => "financial",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::General => "General",
            Category::Admissions => "Admissions",
            Category::Academics => "Academics",
            Category::StudentLife => "Student Life",
            Category::Policies => "Policies",
            Category::Financial => "Financial",
        }
    }

    /// Unknown categories display as general.
    pub fn parse(value: &str) -> Category {
        Category::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == value)
            .unwrap_or_default()
    }
}

/// A file the user picked or dropped, held in memory until upload
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Optional descriptive fields sent alongside an uploaded file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadMetadata {
    pub title: String,
    pub description: String,
    pub category: Category,
}

impl UploadMetadata {
    /// Multipart text fields to send. Empty title/description are omitted.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        let title = self.title.trim();
        if !title.is_empty() {
            fields.push(("title", title.to_string()));
        }
        let description = self.description.trim();
        if !description.is_empty() {
            fields.push(("description", description.to_string()));
        }
        fields.push(("category", self.category.as_str().to_string()));
        fields
    }
}
