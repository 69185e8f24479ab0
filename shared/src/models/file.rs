//! File Model (for file reference pickers)

use serde::{Deserialize, Serialize};

/// Default number of files per picker page
pub const DEFAULT_FILE_PAGE_SIZE: u32 = 50;

/// Largest file page the picker may request
pub const MAX_FILE_PAGE_SIZE: u32 = 100;

/// Clamp a requested file page size; `None` or `0` means the default
pub fn clamp_file_page_size(first: Option<u32>) -> u32 {
    match first {
        None | Some(0) => DEFAULT_FILE_PAGE_SIZE,
        Some(n) => n.min(MAX_FILE_PAGE_SIZE),
    }
}

/// File offered by the picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileItem {
    pub id: String,
    pub label: String,
    pub preview_url: Option<String>,
}

/// Forward-only page info of the file listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilePageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilePage {
    pub files: Vec<FileItem>,
    pub page_info: FilePageInfo,
}
