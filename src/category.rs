/// File categorization by extension.
///
/// This module maps file extensions to named categories through a
/// runtime-extensible table. Categories are matched in insertion order and
/// unmatched extensions fall back to the sentinel "Others" category.
///
/// # Examples
///
/// ```
/// use sortbox::category::CategoryTable;
///
/// let table = CategoryTable::default();
/// assert_eq!(table.classify(".jpg"), "Images");
/// assert_eq!(table.classify(".xyz"), CategoryTable::OTHERS);
/// ```

/// Insertion-ordered mapping from category name to its extension list.
///
/// Extensions are stored lower-cased with a leading dot. The table starts
/// from the built-in defaults and may grow for the lifetime of the process;
/// categories are never removed. When the same extension appears in more
/// than one category, the first category in insertion order wins.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    entries: Vec<(String, Vec<String>)>,
}

impl CategoryTable {
    /// Name of the fallback category for unmatched extensions.
    pub const OTHERS: &'static str = "Others";

    /// Creates an empty table with no categories.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds a category with a comma-separated extension list.
    ///
    /// Extensions are trimmed, lower-cased and normalized to carry a leading
    /// dot. An empty name or an extension list that is empty after trimming
    /// is rejected silently and the table is left unchanged. Returns whether
    /// the category was added.
    pub fn add(&mut self, name: &str, extensions: &str) -> bool {
        let name = name.trim();
        let extensions: Vec<String> = extensions
            .split(',')
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty() && *e != ".")
            .map(|e| {
                if e.starts_with('.') {
                    e
                } else {
                    format!(".{}", e)
                }
            })
            .collect();

        if name.is_empty() || extensions.is_empty() {
            return false;
        }

        self.entries.push((name.to_string(), extensions));
        true
    }

    /// Returns the first category whose extension list contains `ext`.
    ///
    /// Matching is case-insensitive and expects the leading dot
    /// (e.g. ".jpg"). Unmatched extensions, including the empty string,
    /// return [`CategoryTable::OTHERS`]. Pure and total.
    pub fn classify(&self, ext: &str) -> &str {
        let ext = ext.to_lowercase();
        for (name, extensions) in &self.entries {
            if extensions.iter().any(|e| *e == ext) {
                return name;
            }
        }
        Self::OTHERS
    }

    /// Iterates category names in insertion order, excluding "Others".
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Number of categories in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no categories.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CategoryTable {
    /// Builds the standard table: Images, Documents, Videos, Music, Archives.
    fn default() -> Self {
        let mut table = Self::empty();
        table.add("Images", ".jpg, .jpeg, .png, .gif, .bmp");
        table.add("Documents", ".pdf, .docx, .txt, .xlsx, .pptx");
        table.add("Videos", ".mp4, .mov, .avi, .mkv");
        table.add("Music", ".mp3, .wav, .flac");
        table.add("Archives", ".zip, .rar, .tar, .gz");
        table
    }
}
